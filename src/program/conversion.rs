use super::definition::ProgramDefinition;
use crate::error::ProgramConversionError;

/// A trait for editor data models that can be converted into a `ProgramDefinition`.
///
/// This is the extension point for plugging in an editor. By implementing this
/// trait on the editor's own node/edge structs, the editor provides a
/// translation layer that `ProgramBuilder` can turn into a runnable graph.
///
/// # Example
///
/// ```rust,no_run
/// use flowrun::prelude::*;
/// use flowrun::error::ProgramConversionError;
/// use std::result::Result;
///
/// struct Block { id: u32, kind: &'static str, text: String, code: String }
/// struct Sheet { blocks: Vec<Block>, links: Vec<(u32, u32)> }
///
/// impl IntoProgram for Sheet {
///     fn into_program(self) -> Result<ProgramDefinition, ProgramConversionError> {
///         Ok(ProgramDefinition {
///             nodes: self
///                 .blocks
///                 .into_iter()
///                 .map(|b| NodeDefinition::new(b.id, b.kind, &b.text, &b.code))
///                 .collect(),
///             edges: self
///                 .links
///                 .into_iter()
///                 .map(|(from, to)| EdgeDefinition::new(from, to))
///                 .collect(),
///         })
///     }
/// }
/// ```
pub trait IntoProgram {
    /// Consumes the object and converts it into a program snapshot.
    fn into_program(self) -> Result<ProgramDefinition, ProgramConversionError>;
}

impl IntoProgram for ProgramDefinition {
    fn into_program(self) -> Result<ProgramDefinition, ProgramConversionError> {
        Ok(self)
    }
}
