use crate::game::Phase;
use crate::table::Actor;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum HandHistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Bet,
    RaiseTo,
    AllIn,
    Refund,
    Win,
    Split,
}

impl HandHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HandHistoryVerb::SmallBlind => "SB",
            HandHistoryVerb::BigBlind => "BB",
            HandHistoryVerb::Fold => "Fold",
            HandHistoryVerb::Check => "Check",
            HandHistoryVerb::Call => "Call",
            HandHistoryVerb::Bet => "Bet",
            HandHistoryVerb::RaiseTo => "Raise to",
            HandHistoryVerb::AllIn => "All-in",
            HandHistoryVerb::Refund => "Uncalled",
            HandHistoryVerb::Win => "Win",
            HandHistoryVerb::Split => "Split",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct HandHistoryEntry {
    pub actor: Actor,
    pub verb: HandHistoryVerb,
    pub amount: Option<u64>,
    pub phase: Phase,
}

impl fmt::Display for HandHistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount {
            Some(a) => write!(f, "{}: {} {}", self.actor, self.verb.label(), a),
            None => write!(f, "{}: {}", self.actor, self.verb.label()),
        }
    }
}

/// Actions of the hand in progress, oldest first. Cleared when the next hand starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandHistory {
    entries: Vec<HandHistoryEntry>,
}

impl HandHistory {
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn record(
        &mut self,
        actor: Actor,
        verb: HandHistoryVerb,
        amount: Option<u64>,
        phase: Phase,
    ) {
        self.entries.push(HandHistoryEntry { actor, verb, amount, phase });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HandHistoryEntry] {
        &self.entries
    }

    /// The last `n` entries, skipping the newest `offset` (for scrolling back).
    pub fn recent_offset(&self, n: usize, offset: usize) -> &[HandHistoryEntry] {
        let len = self.entries.len();
        let offset = offset.min(len.saturating_sub(n));
        let end = len - offset;
        let start = end.saturating_sub(n);
        &self.entries[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: u64) -> HandHistory {
        let mut h = HandHistory::default();
        for i in 0..n {
            h.record(Actor::Human, HandHistoryVerb::Bet, Some(i), Phase::Flop);
        }
        h
    }

    #[test]
    fn recent_offset_scrolls_and_clamps() {
        let h = filled(10);
        let last3: Vec<_> = h.recent_offset(3, 0).iter().map(|e| e.amount).collect();
        assert_eq!(last3, vec![Some(7), Some(8), Some(9)]);
        let back2: Vec<_> = h.recent_offset(3, 2).iter().map(|e| e.amount).collect();
        assert_eq!(back2, vec![Some(5), Some(6), Some(7)]);
        assert_eq!(h.recent_offset(3, 100)[0].amount, Some(0));
        assert!(HandHistory::default().recent_offset(3, 1).is_empty());
    }

    #[test]
    fn entries_render_with_labels() {
        let mut h = HandHistory::default();
        h.record(Actor::Opponent, HandHistoryVerb::RaiseTo, Some(60), Phase::PreFlop);
        h.record(Actor::Human, HandHistoryVerb::Fold, None, Phase::PreFlop);
        assert_eq!(h.entries()[0].to_string(), "Opponent: Raise to 60");
        assert_eq!(h.entries()[1].to_string(), "You: Fold");
    }
}
