//! End-to-end conversion: decode, dispatch, encode.

use aff_lookup::LookupTables;
use aff_model::{Conversion, Result};
use tracing::debug;

use crate::decode::decode;
use crate::encode::encode;
use crate::handlers::{HandlerContext, dispatch};
use crate::resolve::{ResolverRegistry, default_registry};

/// Converts legacy links against one set of lookup tables and resolvers.
///
/// Holds only shared references, so one transformer can serve any number
/// of threads.
#[derive(Clone, Copy)]
pub struct Transformer<'a> {
    tables: &'a LookupTables,
    resolvers: &'a ResolverRegistry,
}

impl<'a> Transformer<'a> {
    /// Transformer using the default resolver registry.
    pub fn new(tables: &'a LookupTables) -> Self {
        Self::with_resolvers(tables, default_registry())
    }

    pub fn with_resolvers(tables: &'a LookupTables, resolvers: &'a ResolverRegistry) -> Self {
        Self { tables, resolvers }
    }

    /// Converts one legacy URL.
    ///
    /// Returns the destination URL, flagged with a caveat when the handler
    /// had to guess at the table identity.
    ///
    /// # Errors
    ///
    /// Every failure carries an [`aff_model::ErrorKind`] telling callers
    /// whether the input, the data, or a missing rule is to blame.
    pub fn convert(&self, raw: &str) -> Result<Conversion> {
        let link = decode(raw)?;
        let output = dispatch(
            &link,
            HandlerContext {
                tables: self.tables,
                resolvers: self.resolvers,
            },
        )?;
        let url = encode(&output.link)?;
        debug!(input = raw.trim(), url = %url, "converted link");
        Ok(match output.caveat {
            Some(caveat) => Conversion::low_confidence(url, caveat),
            None => Conversion::exact(url),
        })
    }
}
