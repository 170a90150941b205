//! Timed rotation through groups of items inside a section
//!
//! The wedding itinerary and notes sections show their entries a few at a
//! time and cycle through the groups on a fixed interval.

use std::time::Duration;

/// Group size and rotation interval for a rotating section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRotation {
    /// Items shown together
    pub group_size: usize,
    /// Time each group stays on screen
    pub interval: Duration,
}

impl GroupRotation {
    pub const fn new(group_size: usize, interval: Duration) -> Self {
        Self { group_size, interval }
    }

    /// Split `items` into consecutive groups; the last one may be shorter
    pub fn groups<'a, T>(&self, items: &'a [T]) -> Vec<&'a [T]> {
        items.chunks(self.group_size.max(1)).collect()
    }

    /// Number of groups `len` items produce
    pub fn group_count(&self, len: usize) -> usize {
        len.div_ceil(self.group_size.max(1))
    }

    /// Index of the group visible after `elapsed`
    pub fn active_group(&self, len: usize, elapsed: Duration) -> usize {
        let count = self.group_count(len);
        if count <= 1 || self.interval.is_zero() {
            return 0;
        }
        let ticks = elapsed.as_nanos() / self.interval.as_nanos();
        (ticks % count as u128) as usize
    }

    /// The visible group itself, if there are any items
    pub fn active_slice<'a, T>(&self, items: &'a [T], elapsed: Duration) -> Option<&'a [T]> {
        self.groups(items).get(self.active_group(items.len(), elapsed)).copied()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ITINERARY: GroupRotation = GroupRotation::new(3, Duration::from_secs(8));

    #[test]
    fn groups_split_with_short_tail() {
        let items = [1, 2, 3, 4];
        let groups = ITINERARY.groups(&items);
        assert_eq!(groups, vec![&[1, 2, 3][..], &[4][..]]);
    }

    #[test]
    fn empty_items_have_no_groups() {
        let items: [u8; 0] = [];
        assert!(ITINERARY.groups(&items).is_empty());
        assert_eq!(ITINERARY.group_count(0), 0);
        assert_eq!(ITINERARY.active_slice(&items, Duration::from_secs(30)), None);
    }

    #[test]
    fn single_group_never_rotates() {
        assert_eq!(ITINERARY.active_group(3, Duration::from_secs(100)), 0);
    }

    #[test]
    fn rotation_cycles_through_groups() {
        assert_eq!(ITINERARY.active_group(4, Duration::from_secs(0)), 0);
        assert_eq!(ITINERARY.active_group(4, Duration::from_millis(7_999)), 0);
        assert_eq!(ITINERARY.active_group(4, Duration::from_secs(8)), 1);
        assert_eq!(ITINERARY.active_group(4, Duration::from_secs(16)), 0);
    }
}
