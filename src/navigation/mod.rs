//! Section navigation
//!
//! The [`SectionNavigator`] owns the position inside an ordered list of
//! sections. Every input source funnels into [`SectionNavigator::go_to`],
//! which accepts at most one transition per cooldown window and notifies
//! subscribers synchronously.

pub mod clock;
pub mod input;
pub mod rotation;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::InvitationError;
use clock::{Clock, SystemClock};

/// What happens when `next`/`prev` run past either end of the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Stay on the first/last section
    #[default]
    Clamp,
    /// Continue from the opposite end (carousel)
    Wrap,
}

/// Navigator tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// How long new requests are ignored after an accepted transition
    pub cooldown: Duration,
    /// End-of-list behavior
    pub boundary: BoundaryPolicy,
}

impl NavigatorConfig {
    /// Default cooldown window
    pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(800);
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self { cooldown: Self::DEFAULT_COOLDOWN, boundary: BoundaryPolicy::Clamp }
    }
}

/// An accepted change of section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Section now active
    pub current: usize,
    /// Section active before this transition
    pub previous: usize,
}

/// Handle returned by [`SectionNavigator::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Transition)>;

/// State machine over `0..len` section indices
pub struct SectionNavigator<C: Clock = SystemClock> {
    len: usize,
    current: usize,
    previous: Option<usize>,
    cooldown_until: Option<Instant>,
    config: NavigatorConfig,
    clock: C,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl SectionNavigator<SystemClock> {
    /// Create a navigator on the wall clock
    pub fn new(len: usize, config: NavigatorConfig) -> Result<Self, InvitationError> {
        Self::with_clock(len, config, SystemClock)
    }
}

impl<C: Clock> SectionNavigator<C> {
    /// Create a navigator with an explicit time source
    pub fn with_clock(
        len: usize,
        config: NavigatorConfig,
        clock: C,
    ) -> Result<Self, InvitationError> {
        if len == 0 {
            return Err(InvitationError::EmptySections);
        }
        Ok(Self {
            len,
            current: 0,
            previous: None,
            cooldown_until: None,
            config,
            clock,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; construction rejects empty lists
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Active section
    pub fn current(&self) -> usize {
        self.current
    }

    /// Section active before the last accepted transition
    pub fn previous_index(&self) -> Option<usize> {
        self.previous
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.len - 1
    }

    /// Fraction of the flow reached, in `(0, 1]`
    pub fn progress(&self) -> f64 {
        (self.current + 1) as f64 / self.len as f64
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Whether the cooldown window of the last transition is still open
    pub fn is_transitioning(&self) -> bool {
        self.cooldown_until.is_some_and(|until| self.clock.now() < until)
    }

    /// Move to `index`
    ///
    /// Returns `false` without touching any state when the index is out of
    /// range or a transition is still cooling down.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            tracing::debug!(index, len = self.len, "ignoring out-of-range section");
            return false;
        }
        if self.is_transitioning() {
            tracing::debug!(index, current = self.current, "dropping request during cooldown");
            return false;
        }

        let transition = Transition { current: index, previous: self.current };
        self.previous = Some(self.current);
        self.current = index;
        self.cooldown_until = Some(self.clock.now() + self.config.cooldown);
        tracing::debug!(from = transition.previous, to = transition.current, "section changed");

        for (_, listener) in &mut self.listeners {
            listener(&transition);
        }
        true
    }

    /// Advance one section
    pub fn next(&mut self) -> bool {
        let target = if self.current + 1 < self.len {
            self.current + 1
        } else {
            match self.config.boundary {
                BoundaryPolicy::Clamp => return false,
                BoundaryPolicy::Wrap => 0,
            }
        };
        self.go_to(target)
    }

    /// Go back one section
    pub fn prev(&mut self) -> bool {
        let target = if self.current > 0 {
            self.current - 1
        } else {
            match self.config.boundary {
                BoundaryPolicy::Clamp => return false,
                BoundaryPolicy::Wrap => self.len - 1,
            }
        };
        self.go_to(target)
    }

    /// Jump to the first section
    pub fn first(&mut self) -> bool {
        self.go_to(0)
    }

    /// Jump to the last section
    pub fn last(&mut self) -> bool {
        self.go_to(self.len - 1)
    }

    /// Register a change listener, called after every accepted transition
    pub fn subscribe(&mut self, listener: impl FnMut(&Transition) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < before
    }
}

impl<C: Clock> std::fmt::Debug for SectionNavigator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionNavigator")
            .field("len", &self.len)
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::clock::ManualClock;
    use super::*;

    const COOLDOWN: Duration = Duration::from_millis(800);

    fn navigator(
        len: usize,
        boundary: BoundaryPolicy,
    ) -> (SectionNavigator<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let nav = SectionNavigator::with_clock(
            len,
            NavigatorConfig { cooldown: COOLDOWN, boundary },
            clock.clone(),
        )
        .unwrap();
        (nav, clock)
    }

    fn settle(clock: &ManualClock) {
        clock.advance(COOLDOWN + Duration::from_millis(1));
    }

    #[test]
    fn empty_section_list_is_rejected() {
        let result = SectionNavigator::new(0, NavigatorConfig::default());
        assert!(matches!(result, Err(InvitationError::EmptySections)));
    }

    #[test]
    fn starts_at_first_section_without_previous() {
        let (nav, _) = navigator(9, BoundaryPolicy::Clamp);
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.previous_index(), None);
        assert!(!nav.is_transitioning());
        assert!(nav.is_first());
    }

    #[test]
    fn go_to_records_previous_and_starts_cooldown() {
        let (mut nav, _) = navigator(9, BoundaryPolicy::Clamp);
        assert!(nav.go_to(4));
        assert_eq!(nav.current(), 4);
        assert_eq!(nav.previous_index(), Some(0));
        assert!(nav.is_transitioning());
    }

    #[test]
    fn out_of_range_go_to_is_ignored() {
        let (mut nav, _) = navigator(9, BoundaryPolicy::Clamp);
        assert!(!nav.go_to(9));
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.previous_index(), None);
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn second_request_inside_cooldown_is_dropped() {
        let (mut nav, _) = navigator(9, BoundaryPolicy::Clamp);
        assert!(nav.go_to(3));
        assert!(!nav.go_to(5));
        assert_eq!(nav.current(), 3);
        assert_eq!(nav.previous_index(), Some(0));
    }

    #[test]
    fn cooldown_releases_on_its_own() {
        let (mut nav, clock) = navigator(9, BoundaryPolicy::Clamp);
        nav.go_to(0);
        assert!(!nav.go_to(1));

        settle(&clock);

        assert!(!nav.is_transitioning());
        assert!(nav.go_to(1));
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn cooldown_still_holds_just_before_expiry() {
        let (mut nav, clock) = navigator(9, BoundaryPolicy::Clamp);
        nav.go_to(2);
        clock.advance(COOLDOWN - Duration::from_millis(1));
        assert!(nav.is_transitioning());
        assert!(!nav.next());
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn clamp_keeps_last_section() {
        let (mut nav, clock) = navigator(9, BoundaryPolicy::Clamp);
        nav.go_to(8);
        settle(&clock);

        assert!(!nav.next());
        assert_eq!(nav.current(), 8);
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn clamp_keeps_first_section() {
        let (mut nav, _) = navigator(9, BoundaryPolicy::Clamp);
        assert!(!nav.prev());
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn wrap_goes_from_last_to_first() {
        let (mut nav, clock) = navigator(9, BoundaryPolicy::Wrap);
        nav.go_to(8);
        settle(&clock);

        assert!(nav.next());
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.previous_index(), Some(8));
    }

    #[test]
    fn wrap_goes_from_first_to_last() {
        let (mut nav, _) = navigator(9, BoundaryPolicy::Wrap);
        assert!(nav.prev());
        assert_eq!(nav.current(), 8);
    }

    #[test]
    fn single_section_wrap_stays_put() {
        let (mut nav, _) = navigator(1, BoundaryPolicy::Wrap);
        assert!(nav.next());
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.previous_index(), Some(0));
    }

    #[test]
    fn first_and_last_jump_to_ends() {
        let (mut nav, clock) = navigator(9, BoundaryPolicy::Clamp);
        assert!(nav.last());
        assert!(nav.is_last());
        settle(&clock);
        assert!(nav.first());
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn progress_reaches_one_on_last_section() {
        let (mut nav, _) = navigator(4, BoundaryPolicy::Clamp);
        assert_eq!(nav.progress(), 0.25);
        nav.last();
        assert_eq!(nav.progress(), 1.0);
    }

    #[test]
    fn listeners_receive_each_accepted_transition() {
        let (mut nav, clock) = navigator(9, BoundaryPolicy::Clamp);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        nav.subscribe(move |t| sink.borrow_mut().push(*t));

        nav.next();
        nav.next(); // dropped
        settle(&clock);
        nav.go_to(5);

        assert_eq!(
            *seen.borrow(),
            vec![Transition { current: 1, previous: 0 }, Transition { current: 5, previous: 1 }]
        );
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let (mut nav, _) = navigator(9, BoundaryPolicy::Clamp);
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = nav.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(nav.unsubscribe(id));
        assert!(!nav.unsubscribe(id));
        nav.next();

        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn dropped_request_leaves_state_untouched() {
        let (mut nav, _) = navigator(9, BoundaryPolicy::Wrap);
        nav.go_to(6);
        let before = (nav.current(), nav.previous_index());

        nav.next();
        nav.prev();
        nav.first();
        nav.last();
        nav.go_to(2);

        assert_eq!((nav.current(), nav.previous_index()), before);
    }
}
