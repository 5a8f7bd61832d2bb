use crate::favorites::FavoriteEntry;
use std::time::{Duration, Instant};

pub const DEFAULT_DISPLAY: Duration = Duration::from_millis(4000);
pub const DEFAULT_EXIT: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Just created; becomes visible on the next tick
    Entering,
    Shown,
    /// Exit transition running; removed once it completes
    Hidden,
}

/// What a notice's action button does when invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    RestoreFavorites(Vec<FavoriteEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeAction {
    pub label: String,
    pub kind: ActionKind,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub action: Option<NoticeAction>,
    pub phase: Phase,
    shown_at: Instant,
    hidden_at: Option<Instant>,
}

/// Stack of transient, self-dismissing notices
#[derive(Debug)]
pub struct Notifier {
    notices: Vec<Notice>,
    next_id: u64,
    display: Duration,
    exit: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY, DEFAULT_EXIT)
    }
}

impl Notifier {
    pub fn new(display: Duration, exit: Duration) -> Self {
        Self {
            notices: Vec::new(),
            next_id: 1,
            display,
            exit,
        }
    }

    /// Change timings; notices already on screen follow the new schedule
    pub fn set_timings(&mut self, display: Duration, exit: Duration) {
        self.display = display;
        self.exit = exit;
    }

    pub fn show(&mut self, message: &str, action: Option<NoticeAction>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!(id, text = message, "notice shown");
        self.notices.push(Notice {
            id,
            message: message.to_string(),
            action,
            phase: Phase::Entering,
            shown_at: now,
            hidden_at: None,
        });
        id
    }

    /// Advance every notice's timeline to `now`
    pub fn tick(&mut self, now: Instant) {
        let display = self.display;
        let exit = self.exit;

        for notice in &mut self.notices {
            if notice.phase == Phase::Entering {
                notice.phase = Phase::Shown;
            }
            if notice.phase == Phase::Shown && now.duration_since(notice.shown_at) >= display {
                notice.phase = Phase::Hidden;
                notice.hidden_at = Some(notice.shown_at + display);
            }
        }

        self.notices.retain(|notice| match notice.hidden_at {
            Some(hidden_at) => now.duration_since(hidden_at) < exit,
            None => true,
        });
    }

    /// Run a notice's action: the notice is removed immediately and its action returned
    pub fn invoke(&mut self, id: u64) -> Option<ActionKind> {
        let index = self
            .notices
            .iter()
            .position(|notice| notice.id == id && notice.action.is_some())?;
        let notice = self.notices.remove(index);
        notice.action.map(|action| action.kind)
    }

    /// Id of the newest notice that still offers an action
    pub fn latest_actionable(&self) -> Option<u64> {
        self.notices
            .iter()
            .rev()
            .find(|notice| notice.action.is_some())
            .map(|notice| notice.id)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Notices that are currently on screen (entering ones appear after the next tick)
    pub fn visible(&self) -> impl Iterator<Item = &Notice> {
        self.notices
            .iter()
            .filter(|notice| notice.phase != Phase::Entering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn undo_action() -> NoticeAction {
        NoticeAction {
            label: "Undo".to_string(),
            kind: ActionKind::RestoreFavorites(Vec::new()),
        }
    }

    #[test]
    fn test_notice_lifecycle() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        notifier.show("Saved", None, start);

        assert_eq!(notifier.notices()[0].phase, Phase::Entering);
        assert_eq!(notifier.visible().count(), 0);

        notifier.tick(start);
        assert_eq!(notifier.notices()[0].phase, Phase::Shown);
        assert_eq!(notifier.visible().count(), 1);

        notifier.tick(start + ms(3999));
        assert_eq!(notifier.notices()[0].phase, Phase::Shown);

        notifier.tick(start + ms(4000));
        assert_eq!(notifier.notices()[0].phase, Phase::Hidden);

        notifier.tick(start + ms(4299));
        assert_eq!(notifier.notices().len(), 1);

        notifier.tick(start + ms(4300));
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_late_tick_removes_expired_notice() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        notifier.show("Saved", None, start);
        notifier.tick(start + ms(10_000));
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_notices_stack_without_dedup() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        notifier.show("Same", None, start);
        notifier.show("Same", None, start);
        notifier.show("Same", None, start + ms(1000));
        assert_eq!(notifier.notices().len(), 3);

        notifier.tick(start + ms(4100));
        assert_eq!(notifier.notices().len(), 3);
        assert_eq!(notifier.notices()[0].phase, Phase::Hidden);
        assert_eq!(notifier.notices()[2].phase, Phase::Shown);
    }

    #[test]
    fn test_invoke_removes_notice_immediately() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        notifier.show("plain", None, start);
        let id = notifier.show("Favorites cleared", Some(undo_action()), start);

        assert_eq!(notifier.latest_actionable(), Some(id));
        assert_eq!(
            notifier.invoke(id),
            Some(ActionKind::RestoreFavorites(Vec::new()))
        );
        assert_eq!(notifier.notices().len(), 1);
        assert_eq!(notifier.invoke(id), None);
        assert_eq!(notifier.latest_actionable(), None);
    }

    #[test]
    fn test_new_timings_apply_to_live_notices() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        notifier.show("Saved", None, start);
        notifier.set_timings(ms(100), ms(50));

        notifier.tick(start + ms(120));
        assert_eq!(notifier.notices()[0].phase, Phase::Hidden);
        notifier.tick(start + ms(150));
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_action_gone_after_dismissal() {
        let start = Instant::now();
        let mut notifier = Notifier::new(ms(100), ms(10));
        notifier.show("Favorite removed", Some(undo_action()), start);
        notifier.tick(start + ms(200));
        assert_eq!(notifier.latest_actionable(), None);
    }
}
