//! Folio Core Types
//!
//! This crate provides the I/O-free building blocks used by Folio to lay out
//! rendered diagrams on document pages. It includes:
//!
//! - **Geometry**: Points, sizes, bounds and insets ([`geometry`] module)
//! - **Pages**: Standard paper sizes ([`page::PageSize`])
//! - **Placement**: Aspect-preserving fit-and-center arithmetic ([`placement`] module)
//! - **Fonts**: PDF standard font names and advance widths ([`font::StandardFont`])
//! - **Colors**: CSS color parsing ([`color::Color`])

pub mod color;
pub mod font;
pub mod geometry;
pub mod page;
pub mod placement;
