//! # Profile HTML Compiler
//!
//! Renders a [`ProfileData`](profile_schema::ProfileData) into a standalone
//! HTML document: one `page-section` per top-level section, sized for A4.
//! The same markup feeds the PDF converter and the print fallback.

mod compiler;

pub use compiler::{
    compile_to_html, CompileError, CompileOptions, Orientation, PageSetup, PAGE_BREAK_SELECTOR,
};

#[cfg(test)]
mod tests;
