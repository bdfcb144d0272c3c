//! Outcomes the orchestrator asks its host adapter to carry out.

/// Sound cues; playback is the host's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sound {
    /// Correct selection.
    Blip,
    /// Module solved.
    GoodGame,
}

/// Side effect produced by a state transition, in emission order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// A new icon/part became active. `substitute_for` names the queued unit
    /// when the fallback icon stands in for it.
    IconPresented {
        icon: String,
        part: String,
        substitute_for: Option<String>,
    },
    /// A selection was adjudicated against the active part.
    SelectionJudged {
        icon: String,
        part: String,
        index: u32,
        correct: bool,
    },
    /// Report a strike to the host.
    Strike,
    /// Report the module as passed. Emitted at most once.
    Pass,
    PlaySound(Sound),
}
