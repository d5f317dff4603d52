//! Capability shared by every renderable entity.
//!
//! A geometric object can serialize itself to JSON and can own child
//! geometric objects. It also collects non-fatal [`Diagnostic`] notices
//! raised while it was built, instead of aborting.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// One non-fatal notice, tagged with the source location that raised it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub file: &'static str,
    pub line: u32,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.message)
    }
}

/// Builds a [`Diagnostic`] at the call site, `format!`-style.
#[macro_export]
macro_rules! diagnostic {
    ($($arg:tt)*) => {
        $crate::gfx::Diagnostic {
            message: format!($($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// A renderable entity: serializable, and able to own child objects.
pub trait GfxObject: fmt::Debug {
    /// Serializes this object (and its own data, not its attached children)
    /// to its external JSON representation.
    fn to_json(&self) -> Value;

    /// Attaches a child object; ownership moves to `self`.
    fn add_child(&mut self, child: Box<dyn GfxObject>);

    /// Children attached with [`GfxObject::add_child`], in insertion order.
    fn children(&self) -> &[Box<dyn GfxObject>];

    /// Notices accumulated while building this object.
    fn diagnostics(&self) -> &[Diagnostic];
}

/// Child list and notice list embedded by each [`GfxObject`] implementor.
#[derive(Debug, Default)]
pub struct Attachments {
    pub children: Vec<Box<dyn GfxObject>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Attachments {
    /// Records a notice and forwards it to the log.
    pub fn notice(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}
