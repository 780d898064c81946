//! Fixed harbor content: layout, objects, item descriptions and narration.

pub mod interactables;
pub mod items;
pub mod narrative;
pub mod props;
