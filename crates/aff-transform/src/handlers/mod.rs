//! Special-case handlers, one per legacy link shape.
//!
//! Each handler reads the fields of its link shape, resolves datasets or
//! geographies, and returns the destination link to encode.

mod community_facts;
mod facts;
mod product_view;
mod table;
mod table_servlet;
pub mod topics;

use aff_lookup::LookupTables;
use aff_model::{Caveat, LegacyLink, Result, Route, TransformError};

use crate::encode::NewLink;
use crate::resolve::ResolverRegistry;

/// A destination link plus any confidence caveat the handler attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOutput {
    pub link: NewLink,
    pub caveat: Option<Caveat>,
}

impl HandlerOutput {
    pub fn exact(link: NewLink) -> Self {
        Self { link, caveat: None }
    }

    pub fn low_confidence(link: NewLink, caveat: Caveat) -> Self {
        Self {
            link,
            caveat: Some(caveat),
        }
    }
}

/// Shared read-only inputs of every handler.
#[derive(Clone, Copy)]
pub struct HandlerContext<'a> {
    pub tables: &'a LookupTables,
    pub resolvers: &'a ResolverRegistry,
}

/// Runs the handler selected by the link's route.
pub fn dispatch(link: &LegacyLink, ctx: HandlerContext<'_>) -> Result<HandlerOutput> {
    match (link.route, link.positional(), link.query()) {
        (Route::Table, Some(fields), _) => table::handle(fields, ctx),
        (Route::CommunityFacts, Some(fields), _) => community_facts::handle(fields),
        (Route::FactsServlet, _, Some(params)) => facts::handle(params, ctx),
        (Route::TableServlet(servlet), _, Some(params)) => {
            table_servlet::handle(servlet, params, ctx)
        }
        (Route::ProductView, _, Some(params)) => product_view::handle(params, ctx),
        (route, ..) => Err(TransformError::not_stable(format!(
            "{} link payload does not fit the {route:?} route",
            link.tool
        ))),
    }
}
