use std::fmt;

/// Boxed error type used at the schema compiler boundary.
///
/// Schema sources are external collaborators; whatever they fail with is
/// carried through synthesis unchanged rather than remodeled into crate
/// variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Annotation and synthesis error
///
/// Returned by [`Annotations::declare`](crate::Annotations::declare) when a
/// handler slot is declared twice, and by
/// [`build_path_item`](crate::spec::build_path_item) when a schema source
/// fails to compile.
#[derive(Debug)]
pub enum Error {
    /// A declaration mapping is already attached to this handler slot
    ///
    /// Each slot accepts at most one declaration. Merge the keys into a
    /// single `declare` call instead of declaring twice.
    DuplicateDeclaration,
    /// A schema source failed while compiling during synthesis
    ///
    /// The underlying compiler error is preserved as the source and is not
    /// reinterpreted by this crate.
    Schema(BoxError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateDeclaration => {
                write!(
                    f,
                    "declaration already attached: a handler slot accepts at most one \
                    declaration mapping"
                )
            }
            Error::Schema(err) => {
                write!(f, "schema compilation failed: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DuplicateDeclaration => None,
            Error::Schema(err) => Some(err.as_ref()),
        }
    }
}
