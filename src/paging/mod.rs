// Paging engine - generic paginated lists with rotation and transitions
//
// The engine knows nothing about what it displays or where the data came
// from. Callers hand it a fetch snapshot plus two renderers (one item, the
// page controls) and get back a presentation to draw.
//
// - slicer: pure page math
// - timer: deadline handles fired by the UI loop's poll
// - rotation: unattended page advance on an interval
// - transition: directional animation window after a page change
// - controller: composes the above behind one page-change entry point

pub mod controller;
pub mod rotation;
pub mod slicer;
pub mod timer;
pub mod transition;

pub use controller::{
    ControllerConfig, NavAction, NavControls, PageAccessor, PaginatedListController,
    PaginationState, PagingError, Presentation, SharedPage,
};
pub use rotation::{RotationConfig, RotationState};
pub use slicer::PageSlice;
pub use transition::Direction;
