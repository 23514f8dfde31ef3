//! Paginated list controller
//!
//! Composes the slicer, the rotation scheduler and the transition machine
//! behind one page-change entry point. Manual navigation and rotation ticks
//! both go through [`PaginatedListController::request_page_change`].
//!
//! The controller either owns the current page or defers to an injected
//! [`PageAccessor`] (controlled mode). Either way it still drives animation
//! and rotation against that value.

use super::rotation::{RotationConfig, RotationScheduler, RotationState};
use super::slicer::{self, PageSlice};
use super::transition::{Direction, TransitionStateMachine, DEFAULT_TRANSITION};
use crate::fetch::FetchSnapshot;
use std::cell::Cell;
use std::fmt;
use std::num::NonZeroUsize;
use std::rc::Rc;
use std::time::{Duration, Instant};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Construction-time misconfiguration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagingError {
    /// Page size must be a positive integer
    InvalidPageSize(usize),
    /// Rotation is enabled with a zero interval
    InvalidRotationInterval,
}

impl fmt::Display for PagingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPageSize(size) => {
                write!(f, "Invalid page size {} (must be at least 1)", size)
            }
            Self::InvalidRotationInterval => {
                write!(f, "Rotation interval must be greater than zero")
            }
        }
    }
}

impl std::error::Error for PagingError {}

// ─────────────────────────────────────────────────────────────────────────────
// Page ownership
// ─────────────────────────────────────────────────────────────────────────────

/// Get/set pair for a page index owned outside the controller
pub trait PageAccessor {
    fn get(&self) -> usize;
    fn set(&mut self, page: usize);
}

/// Page index shared between several views on the same thread
///
/// Cloning shares the same cell, so two controllers handed clones of one
/// `SharedPage` always agree on the current page.
#[derive(Debug, Clone)]
pub struct SharedPage(Rc<Cell<usize>>);

impl SharedPage {
    pub fn new(page: usize) -> Self {
        Self(Rc::new(Cell::new(page.max(1))))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for SharedPage {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PageAccessor for SharedPage {
    fn get(&self) -> usize {
        self.0.get()
    }

    fn set(&mut self, page: usize) {
        self.0.set(page);
    }
}

enum PageOwnership {
    Owned(usize),
    External(Box<dyn PageAccessor>),
}

impl PageOwnership {
    fn get(&self) -> usize {
        match self {
            Self::Owned(page) => *page,
            Self::External(accessor) => accessor.get(),
        }
    }

    fn set(&mut self, page: usize) {
        match self {
            Self::Owned(current) => *current = page,
            Self::External(accessor) => accessor.set(page),
        }
    }
}

impl fmt::Debug for PageOwnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owned(page) => write!(f, "Owned({})", page),
            Self::External(accessor) => write!(f, "External({})", accessor.get()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub page_size: usize,
    pub rotation: RotationConfig,
    /// Length of the page-change animation window
    pub transition: Duration,
}

impl ControllerConfig {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            rotation: RotationConfig::disabled(),
            transition: DEFAULT_TRANSITION,
        }
    }

    pub fn with_rotation(mut self, rotation: RotationConfig) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }
}

/// Observable pagination state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub total_pages: usize,
    /// Only Some while animating
    pub direction: Option<Direction>,
    pub is_animating: bool,
}

/// Manual navigation requests, as issued by page controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Previous,
    Next,
    First,
    Last,
    /// Jump to a 1-based page (clamped)
    Goto(usize),
}

/// Inputs for a navigation-control renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    pub current_page: usize,
    pub total_pages: usize,
}

impl NavControls {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// All page numbers, for numbered controls
    pub fn pages(&self) -> impl Iterator<Item = usize> {
        1..=self.total_pages
    }
}

/// What a render pass produced
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation<D> {
    /// Snapshot is still loading
    Loading,
    /// Terminal error, or nothing to show
    Empty,
    Populated {
        /// One unit per item on the current page, in order
        items: Vec<D>,
        /// Present only when there is more than one page
        controls: Option<D>,
        /// Active transition, if any
        transition: Option<Direction>,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct PaginatedListController {
    page_size: NonZeroUsize,
    ownership: PageOwnership,
    transition: TransitionStateMachine,
    rotation: RotationScheduler,
    /// Page count from the most recent observed snapshot
    total_pages: usize,
    disposed: bool,
}

impl PaginatedListController {
    /// Controller that owns its page index (starts at page 1)
    pub fn new(config: ControllerConfig) -> Result<Self, PagingError> {
        Self::build(config, PageOwnership::Owned(1))
    }

    /// Controller whose page index lives behind `accessor`
    pub fn with_external_page(
        config: ControllerConfig,
        accessor: impl PageAccessor + 'static,
    ) -> Result<Self, PagingError> {
        Self::build(config, PageOwnership::External(Box::new(accessor)))
    }

    fn build(config: ControllerConfig, ownership: PageOwnership) -> Result<Self, PagingError> {
        let page_size = NonZeroUsize::new(config.page_size)
            .ok_or(PagingError::InvalidPageSize(config.page_size))?;
        if config.rotation.enabled && config.rotation.interval.is_zero() {
            return Err(PagingError::InvalidRotationInterval);
        }

        Ok(Self {
            page_size,
            ownership,
            transition: TransitionStateMachine::new(config.transition),
            rotation: RotationScheduler::new(config.rotation),
            total_pages: 1,
            disposed: false,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Current page, clamped to the last known page count
    ///
    /// An external owner may hold a value that is out of range for this
    /// controller's data; reads always see it clamped.
    pub fn current_page(&self) -> usize {
        self.ownership.get().clamp(1, self.total_pages)
    }

    pub fn state(&self) -> PaginationState {
        PaginationState {
            current_page: self.current_page(),
            total_pages: self.total_pages,
            direction: self.transition.direction(),
            is_animating: self.transition.is_animating(),
        }
    }

    pub fn rotation_state(&self) -> RotationState {
        self.rotation.state()
    }

    /// Fraction of the running transition elapsed, if animating
    pub fn transition_progress(&self, now: Instant) -> Option<(Direction, f32)> {
        let direction = self.transition.direction()?;
        Some((direction, self.transition.progress(now)?))
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The page-change entry point
    ///
    /// Clamps `page` into `[1, total_pages]`, starts the transition when the
    /// page actually moves, and writes the new value through the ownership
    /// strategy. Returns true when the page changed.
    pub fn request_page_change(&mut self, page: i64, now: Instant) -> bool {
        if self.disposed {
            return false;
        }

        let target = slicer::clamp_page(page, self.total_pages);
        let current = self.current_page();
        if !self.transition.begin(current, target, now) {
            return false;
        }

        tracing::debug!(from = current, to = target, "page change");
        self.ownership.set(target);
        true
    }

    /// Apply a manual navigation action
    pub fn navigate(&mut self, action: NavAction, now: Instant) -> bool {
        let current = self.current_page() as i64;
        let target = match action {
            NavAction::Previous => current - 1,
            NavAction::Next => current + 1,
            NavAction::First => 1,
            NavAction::Last => self.total_pages as i64,
            NavAction::Goto(page) => i64::try_from(page).unwrap_or(i64::MAX),
        };
        self.request_page_change(target, now)
    }

    /// Reconcile with the latest snapshot
    ///
    /// Recomputes the page count, clamps the stored page if the collection
    /// shrank, and arms or idles rotation. Rotation only runs over ready,
    /// non-empty data.
    pub fn observe<T>(&mut self, snapshot: &FetchSnapshot<T>, now: Instant) {
        if self.disposed {
            return;
        }

        let len = snapshot.items().map_or(0, <[T]>::len);
        self.total_pages = slicer::total_pages(len, self.page_size);

        let stored = self.ownership.get();
        let clamped = stored.clamp(1, self.total_pages);
        if stored != clamped {
            tracing::debug!(stored, clamped, "page clamped after data change");
            self.ownership.set(clamped);
        }

        self.rotation
            .sync(self.total_pages, snapshot.has_items(), now);
    }

    /// Fire any due timers
    ///
    /// Settles a finished transition and applies a due rotation tick.
    /// Returns true when visible state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.disposed {
            return false;
        }

        let settled = self.transition.poll(now);
        let rotated = match self.rotation.tick(self.current_page(), now) {
            Some(next) => {
                tracing::trace!(next, "rotation tick");
                self.request_page_change(next as i64, now)
            }
            None => false,
        };
        settled || rotated
    }

    /// Items on the current page of `items`
    pub fn current_slice<'a, T>(&self, items: &'a [T]) -> PageSlice<'a, T> {
        slicer::slice(items, self.page_size, self.current_page())
    }

    /// Render the snapshot through caller-supplied renderers
    ///
    /// Loading → [`Presentation::Loading`]; Error or an empty collection →
    /// [`Presentation::Empty`]; otherwise every item of the current page goes
    /// through `render_item`, and `render_controls` runs when there is more
    /// than one page.
    pub fn render<T, D>(
        &mut self,
        snapshot: &FetchSnapshot<T>,
        now: Instant,
        mut render_item: impl FnMut(&T) -> D,
        render_controls: impl FnOnce(NavControls) -> D,
    ) -> Presentation<D> {
        self.observe(snapshot, now);

        if snapshot.is_loading() {
            return Presentation::Loading;
        }
        let Some(items) = snapshot.items().filter(|items| !items.is_empty()) else {
            return Presentation::Empty;
        };

        let page = self.current_slice(items);
        let rendered = page.items.iter().map(&mut render_item).collect();
        let controls = (page.total_pages > 1).then(|| {
            render_controls(NavControls {
                current_page: page.page,
                total_pages: page.total_pages,
            })
        });

        Presentation::Populated {
            items: rendered,
            controls,
            transition: self.transition.direction(),
        }
    }

    /// Stop timers until the next `observe`
    ///
    /// Used when the list is hidden: the animation is settled and rotation
    /// re-arms from scratch once the list is observed again.
    pub fn suspend(&mut self) {
        self.transition.cancel();
        self.rotation.dispose();
    }

    /// Release all timers; every later call is a no-op
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.transition.cancel();
        self.rotation.dispose();
        self.disposed = true;
    }
}

impl Drop for PaginatedListController {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const MS: Duration = Duration::from_millis(1);
    const SEC: Duration = Duration::from_secs(1);

    fn ready(n: usize) -> FetchSnapshot<usize> {
        FetchSnapshot::ready((0..n).collect(), Utc::now())
    }

    fn controller(page_size: usize) -> PaginatedListController {
        PaginatedListController::new(ControllerConfig::new(page_size)).unwrap()
    }

    fn rotating(page_size: usize) -> PaginatedListController {
        PaginatedListController::new(
            ControllerConfig::new(page_size).with_rotation(RotationConfig::every(SEC)),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let err = PaginatedListController::new(ControllerConfig::new(0)).unwrap_err();
        assert_eq!(err, PagingError::InvalidPageSize(0));
    }

    #[test]
    fn test_zero_rotation_interval_is_rejected() {
        let config = ControllerConfig::new(5).with_rotation(RotationConfig::every(Duration::ZERO));
        let err = PaginatedListController::new(config).unwrap_err();
        assert_eq!(err, PagingError::InvalidRotationInterval);
    }

    #[test]
    fn test_twelve_items_directions() {
        let t0 = Instant::now();
        let mut list = controller(5);
        let snapshot = ready(12);
        list.observe(&snapshot, t0);
        assert_eq!(list.total_pages(), 3);

        assert!(list.request_page_change(2, t0));
        assert_eq!(list.state().direction, Some(Direction::Up));

        list.request_page_change(3, t0 + SEC);
        assert!(list.request_page_change(1, t0 + 2 * SEC));
        let state = list.state();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.direction, Some(Direction::Down));
        assert!(state.is_animating);
    }

    #[test]
    fn test_page_lengths_through_render() {
        let t0 = Instant::now();
        let mut list = controller(5);
        let snapshot = ready(12);

        let mut lengths = Vec::new();
        for page in 1..=3 {
            list.request_page_change(page, t0);
            match list.render(&snapshot, t0, |item| *item, |_| usize::MAX) {
                Presentation::Populated { items, .. } => lengths.push(items.len()),
                other => panic!("expected populated, got {:?}", other),
            }
        }
        assert_eq!(lengths, vec![5, 5, 2]);
    }

    #[test]
    fn test_request_clamps_any_integer() {
        let t0 = Instant::now();
        let mut list = controller(5);
        list.observe(&ready(12), t0);

        for request in [-100i64, -1, 0, 1, 2, 3, 4, 99, i64::MAX, i64::MIN] {
            list.request_page_change(request, t0);
            let page = list.current_page();
            assert!((1..=3).contains(&page), "request {} gave page {}", request, page);
        }

        list.request_page_change(0, t0);
        assert_eq!(list.current_page(), 1);
        list.request_page_change(99, t0);
        assert_eq!(list.current_page(), 3);
    }

    #[test]
    fn test_animation_clears_after_fixed_duration() {
        let t0 = Instant::now();
        let mut list = controller(5);
        list.observe(&ready(12), t0);

        list.request_page_change(2, t0);
        assert!(list.state().is_animating);

        assert!(!list.poll(t0 + 499 * MS));
        assert!(list.state().is_animating);

        assert!(list.poll(t0 + 500 * MS));
        let state = list.state();
        assert!(!state.is_animating);
        assert_eq!(state.direction, None);
    }

    #[test]
    fn test_mid_animation_change_restarts_clear_timer() {
        let t0 = Instant::now();
        let mut list = controller(5);
        list.observe(&ready(12), t0);

        list.request_page_change(3, t0);
        list.request_page_change(2, t0 + 200 * MS);
        assert_eq!(list.state().direction, Some(Direction::Down));

        list.poll(t0 + 500 * MS);
        assert!(list.state().is_animating);
        list.poll(t0 + 700 * MS);
        assert!(!list.state().is_animating);
    }

    #[test]
    fn test_rotation_advances_and_wraps() {
        let t0 = Instant::now();
        let mut list = rotating(5);
        let snapshot = ready(12);
        list.observe(&snapshot, t0);
        assert_eq!(list.rotation_state(), RotationState::Running);

        let mut pages = Vec::new();
        for s in 1..=4 {
            list.poll(t0 + s * SEC);
            pages.push(list.current_page());
        }
        assert_eq!(pages, vec![2, 3, 1, 2]);
    }

    #[test]
    fn test_rotation_tick_animates_like_manual_change() {
        let t0 = Instant::now();
        let mut list = rotating(5);
        list.observe(&ready(12), t0);

        list.poll(t0 + SEC);
        assert_eq!(list.state().direction, Some(Direction::Up));

        list.request_page_change(3, t0 + SEC + 100 * MS);
        list.poll(t0 + 2 * SEC);
        // Wrap from the last page counts as a move down
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.state().direction, Some(Direction::Down));
    }

    #[test]
    fn test_rotation_idle_on_single_page_or_disabled() {
        let t0 = Instant::now();

        let mut single = rotating(5);
        single.observe(&ready(4), t0);
        assert_eq!(single.rotation_state(), RotationState::Idle);
        for s in 1..20 {
            assert!(!single.poll(t0 + s * SEC));
        }
        assert_eq!(single.current_page(), 1);

        let mut disabled = controller(5);
        disabled.observe(&ready(30), t0);
        assert_eq!(disabled.rotation_state(), RotationState::Idle);
        for s in 1..20 {
            assert!(!disabled.poll(t0 + s * SEC));
        }
        assert_eq!(disabled.current_page(), 1);
    }

    #[test]
    fn test_rotation_stops_while_loading_or_erroring() {
        let t0 = Instant::now();
        let mut list = rotating(5);
        list.observe(&ready(12), t0);
        assert_eq!(list.rotation_state(), RotationState::Running);

        list.observe(&FetchSnapshot::<usize>::loading(), t0);
        assert_eq!(list.rotation_state(), RotationState::Idle);
        assert!(!list.poll(t0 + 5 * SEC));

        list.observe(&FetchSnapshot::<usize>::error(Utc::now()), t0);
        assert_eq!(list.rotation_state(), RotationState::Idle);
        assert_eq!(list.total_pages(), 1);
    }

    #[test]
    fn test_shrinking_data_mid_rotation_clamps() {
        let t0 = Instant::now();
        let mut list = rotating(5);
        list.observe(&ready(12), t0);
        list.request_page_change(3, t0);

        // Refetch lands with fewer items before the next tick
        list.observe(&ready(6), t0 + 100 * MS);
        assert_eq!(list.total_pages(), 2);
        assert_eq!(list.current_page(), 2);

        list.poll(t0 + 100 * MS + SEC);
        assert_eq!(list.current_page(), 1);
    }

    #[test]
    fn test_empty_ready_is_empty_presentation() {
        let t0 = Instant::now();
        let mut list = rotating(5);
        let snapshot = FetchSnapshot::<usize>::ready(Vec::new(), Utc::now());

        let mut controls_rendered = false;
        let presentation = list.render(&snapshot, t0, |item| *item, |_| {
            controls_rendered = true;
            0
        });
        assert_eq!(presentation, Presentation::Empty);
        assert!(!controls_rendered);
        assert_eq!(list.total_pages(), 1);
        assert_eq!(list.rotation_state(), RotationState::Idle);
    }

    #[test]
    fn test_loading_and_error_presentations() {
        let t0 = Instant::now();
        let mut list = controller(5);

        let loading = FetchSnapshot::<usize>::loading();
        assert_eq!(list.render(&loading, t0, |i| *i, |_| 0), Presentation::Loading);

        let failed = FetchSnapshot::<usize>::error(Utc::now());
        assert_eq!(list.render(&failed, t0, |i| *i, |_| 0), Presentation::Empty);
    }

    #[test]
    fn test_controls_only_with_multiple_pages() {
        let t0 = Instant::now();
        let mut list = controller(5);

        match list.render(&ready(5), t0, |i| *i, |_| 99) {
            Presentation::Populated { controls, .. } => assert_eq!(controls, None),
            other => panic!("unexpected {:?}", other),
        }

        let presentation = list.render(&ready(7), t0, |i| *i, |nav| {
            assert_eq!(nav.total_pages, 2);
            nav.current_page
        });
        match presentation {
            Presentation::Populated { items, controls, .. } => {
                assert_eq!(items, vec![0, 1, 2, 3, 4]);
                assert_eq!(controls, Some(1));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_direction_only_reported_while_animating() {
        let t0 = Instant::now();
        let mut list = controller(5);
        let snapshot = ready(12);
        list.observe(&snapshot, t0);
        list.request_page_change(2, t0);

        match list.render(&snapshot, t0, |i| *i, |_| 0) {
            Presentation::Populated { transition, .. } => {
                assert_eq!(transition, Some(Direction::Up))
            }
            other => panic!("unexpected {:?}", other),
        }

        list.poll(t0 + SEC);
        match list.render(&snapshot, t0 + SEC, |i| *i, |_| 0) {
            Presentation::Populated { transition, .. } => assert_eq!(transition, None),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_navigate_actions() {
        let t0 = Instant::now();
        let mut list = controller(2);
        list.observe(&ready(9), t0);

        list.navigate(NavAction::Last, t0);
        assert_eq!(list.current_page(), 5);
        assert!(!list.navigate(NavAction::Next, t0));
        assert_eq!(list.current_page(), 5);
        list.navigate(NavAction::Previous, t0);
        assert_eq!(list.current_page(), 4);
        list.navigate(NavAction::Goto(2), t0);
        assert_eq!(list.current_page(), 2);
        list.navigate(NavAction::First, t0);
        assert_eq!(list.current_page(), 1);
        assert!(!list.navigate(NavAction::Previous, t0));
    }

    #[test]
    fn test_external_page_is_written_through_accessor() {
        let t0 = Instant::now();
        let page = SharedPage::default();
        let mut list = PaginatedListController::with_external_page(
            ControllerConfig::new(5).with_rotation(RotationConfig::every(SEC)),
            page.clone(),
        )
        .unwrap();
        list.observe(&ready(12), t0);

        list.request_page_change(3, t0);
        assert_eq!(page.get(), 3);

        // Rotation writes through the same accessor
        list.poll(t0 + SEC);
        assert_eq!(page.get(), 1);
        assert_eq!(list.state().direction, Some(Direction::Down));
    }

    #[test]
    fn test_external_page_shared_between_controllers() {
        let t0 = Instant::now();
        let page = SharedPage::default();
        let mut table =
            PaginatedListController::with_external_page(ControllerConfig::new(5), page.clone())
                .unwrap();
        let mut cards =
            PaginatedListController::with_external_page(ControllerConfig::new(5), page.clone())
                .unwrap();
        let snapshot = ready(12);
        table.observe(&snapshot, t0);
        cards.observe(&snapshot, t0);

        table.request_page_change(2, t0);
        assert_eq!(cards.current_page(), 2);
    }

    #[test]
    fn test_dispose_stops_all_mutation() {
        let t0 = Instant::now();
        let mut list = rotating(5);
        let snapshot = ready(12);
        list.observe(&snapshot, t0);
        list.request_page_change(2, t0);
        list.dispose();

        let before = list.state();
        assert!(!list.poll(t0 + 10 * SEC));
        assert!(!list.request_page_change(3, t0 + 10 * SEC));
        list.observe(&ready(40), t0 + 10 * SEC);

        let after = list.state();
        assert_eq!(after.current_page, before.current_page);
        assert_eq!(after.total_pages, before.total_pages);
        assert!(!after.is_animating);
        assert_eq!(list.rotation_state(), RotationState::Idle);
    }

    #[test]
    fn test_dispose_with_external_owner_leaves_value_untouched() {
        let t0 = Instant::now();
        let page = SharedPage::new(2);
        let mut list = PaginatedListController::with_external_page(
            ControllerConfig::new(5).with_rotation(RotationConfig::every(SEC)),
            page.clone(),
        )
        .unwrap();
        list.observe(&ready(12), t0);
        drop(list);

        // Nothing can tick after drop; the owner's value stays put
        assert_eq!(page.get(), 2);
    }

    #[test]
    fn test_suspend_rearms_rotation_on_next_observe() {
        let t0 = Instant::now();
        let mut list = rotating(5);
        let snapshot = ready(12);
        list.observe(&snapshot, t0);
        list.suspend();
        assert_eq!(list.rotation_state(), RotationState::Idle);

        // Long after the original schedule, observing again starts fresh
        let later = t0 + 30 * SEC;
        list.observe(&snapshot, later);
        assert!(!list.poll(later));
        assert!(list.poll(later + SEC));
        assert_eq!(list.current_page(), 2);
    }
}
