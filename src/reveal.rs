use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealChange {
    /// First intersection: mark visible and stop watching.
    Revealed,
    AlreadyVisible,
    Hidden,
}

/// Latch key for a reveal target: its `data-reveal` value, else its element
/// id. Targets with neither get `None` and are revealed without a latch, so
/// keyless targets never share one.
pub fn reveal_key(data_reveal: Option<String>, id: String) -> Option<String> {
    data_reveal
        .filter(|value| !value.is_empty())
        .or_else(|| Some(id).filter(|id| !id.is_empty()))
}

/// One-way latch per reveal target. Scrolling a target back out of view never
/// clears it.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: HashSet<String>,
}

impl RevealTracker {
    pub fn observe(&mut self, id: &str, is_intersecting: bool, ratio: f64) -> RevealChange {
        if self.is_visible(id) {
            return RevealChange::AlreadyVisible;
        }

        if is_intersecting && ratio > 0.0 {
            self.revealed.insert(id.to_string());
            RevealChange::Revealed
        } else {
            RevealChange::Hidden
        }
    }

    pub fn reveal(&mut self, id: &str) -> RevealChange {
        if self.revealed.insert(id.to_string()) {
            RevealChange::Revealed
        } else {
            RevealChange::AlreadyVisible
        }
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn visible_count(&self) -> usize {
        self.revealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_until_first_intersection() {
        let mut tracker = RevealTracker::default();

        assert_eq!(tracker.observe("skills", false, 0.0), RevealChange::Hidden);
        assert!(!tracker.is_visible("skills"));

        assert_eq!(tracker.observe("skills", true, 0.12), RevealChange::Revealed);
        assert!(tracker.is_visible("skills"));
    }

    #[test]
    fn scrolling_out_never_reverts_visibility() {
        let mut tracker = RevealTracker::default();
        tracker.observe("projects", true, 0.5);

        assert_eq!(
            tracker.observe("projects", false, 0.0),
            RevealChange::AlreadyVisible
        );
        assert!(tracker.is_visible("projects"));
    }

    #[test]
    fn targets_latch_independently() {
        let mut tracker = RevealTracker::default();
        tracker.observe("skills", true, 1.0);

        assert!(!tracker.is_visible("contact"));
        assert_eq!(tracker.reveal("contact"), RevealChange::Revealed);
        assert_eq!(tracker.reveal("contact"), RevealChange::AlreadyVisible);
        assert_eq!(tracker.visible_count(), 2);
    }

    #[test]
    fn key_prefers_data_reveal_then_id() {
        assert_eq!(
            reveal_key(Some("skills".into()), "skills-section".into()),
            Some("skills".to_string())
        );
        assert_eq!(
            reveal_key(Some(String::new()), "contact".into()),
            Some("contact".to_string())
        );
        assert_eq!(reveal_key(None, "about".into()), Some("about".to_string()));
    }

    #[test]
    fn keyless_targets_get_no_shared_latch() {
        assert_eq!(reveal_key(Some(String::new()), String::new()), None);
        assert_eq!(reveal_key(None, String::new()), None);

        // an empty key would make every later keyless target "already visible"
        let mut tracker = RevealTracker::default();
        tracker.observe("hero", true, 1.0);
        assert_eq!(tracker.observe("about", true, 1.0), RevealChange::Revealed);
        assert_eq!(tracker.visible_count(), 2);
    }

    #[test]
    fn zero_ratio_intersection_does_not_reveal() {
        let mut tracker = RevealTracker::default();
        assert_eq!(tracker.observe("hero", true, 0.0), RevealChange::Hidden);
    }
}
