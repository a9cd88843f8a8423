//! Narration service boundary - short mission briefs on progress milestones
//!
//! The sim emits a milestone event when the published percentage crosses a
//! multiple of 25 below 100; an independent task fetches a one-line brief
//! and substitutes a fixed string when the service is absent or failing.
//! Nothing here may block or delay the frame loop, and a fetch that lands
//! after teardown must be discarded by the caller.

/// Brief shown before the service first answers (and when it never does)
pub const FALLBACK_BRIEF: &str = "Mission: clean up this mess. Arrow keys to move.";
/// Brief substituted when a fetch fails mid-run
pub const OFFLINE_BRIEF: &str = "Link down. Manual override: clean everything.";

/// Progress thresholds that request a fresh brief
const MILESTONES: [u8; 3] = [25, 50, 75];

/// Crossing detector for narration thresholds.
///
/// Each milestone fires at most once. An update that jumps past several
/// milestones announces only the highest; the ones below are marked spent.
/// Nothing fires at 100 - victory has its own signal.
#[derive(Debug, Clone, Default)]
pub struct MilestoneTracker {
    fired: [bool; MILESTONES.len()],
}

impl MilestoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a published percentage; returns the milestone to announce.
    pub fn crossed(&mut self, percent: u8) -> Option<u8> {
        let mut newest = None;
        for (i, &milestone) in MILESTONES.iter().enumerate() {
            if percent >= milestone && !self.fired[i] {
                self.fired[i] = true;
                if percent < 100 {
                    newest = Some(milestone);
                }
            }
        }
        newest
    }
}

/// Relative endpoint answering `GET api/brief?percent=N` with one line
#[cfg(target_arch = "wasm32")]
const BRIEF_ENDPOINT: &str = "api/brief";

/// Fetch a mission brief for the given percentage.
///
/// Resolves to a fallback string on any failure - never an error - so
/// callers can fire-and-forget from `spawn_local`.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_brief(percent: u8) -> String {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let Some(window) = web_sys::window() else {
        return OFFLINE_BRIEF.to_string();
    };

    let url = format!("{BRIEF_ENDPOINT}?percent={percent}");
    let value = match JsFuture::from(window.fetch_with_str(&url)).await {
        Ok(value) => value,
        Err(_) => {
            log::warn!("brief fetch failed; using offline line");
            return OFFLINE_BRIEF.to_string();
        }
    };
    let Ok(response) = value.dyn_into::<web_sys::Response>() else {
        return OFFLINE_BRIEF.to_string();
    };
    if !response.ok() {
        log::warn!("brief endpoint returned {}", response.status());
        return OFFLINE_BRIEF.to_string();
    }
    let Ok(text_promise) = response.text() else {
        return OFFLINE_BRIEF.to_string();
    };
    match JsFuture::from(text_promise).await {
        Ok(text) => {
            let text = text.as_string().unwrap_or_default();
            let text = text.trim();
            if text.is_empty() {
                OFFLINE_BRIEF.to_string()
            } else {
                text.to_string()
            }
        }
        Err(_) => OFFLINE_BRIEF.to_string(),
    }
}

/// Native stub - the narration service is a browser affair.
#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_brief(_percent: u8) -> String {
    FALLBACK_BRIEF.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_each_milestone_once() {
        let mut tracker = MilestoneTracker::new();
        assert_eq!(tracker.crossed(0), None);
        assert_eq!(tracker.crossed(10), None);
        assert_eq!(tracker.crossed(25), Some(25));
        assert_eq!(tracker.crossed(25), None);
        assert_eq!(tracker.crossed(30), None);
        assert_eq!(tracker.crossed(50), Some(50));
        assert_eq!(tracker.crossed(99), Some(75));
        assert_eq!(tracker.crossed(99), None);
    }

    #[test]
    fn a_jump_announces_only_the_highest() {
        let mut tracker = MilestoneTracker::new();
        assert_eq!(tracker.crossed(80), Some(75));
        // The skipped thresholds are spent, not deferred
        assert_eq!(tracker.crossed(80), None);
        assert_eq!(tracker.crossed(25), None);
    }

    #[test]
    fn nothing_fires_at_completion() {
        let mut tracker = MilestoneTracker::new();
        assert_eq!(tracker.crossed(100), None);
        // And the thresholds are spent afterwards
        assert_eq!(tracker.crossed(75), None);
    }
}
