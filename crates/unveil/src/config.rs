#![forbid(unsafe_code)]

//! Component configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::alphabet::{Alphabet, DEFAULT_CHARACTERS};
use crate::error::{ConfigError, Result, TriggerParseError};
use crate::policy::RevealDirection;

/// Default tick interval.
pub const DEFAULT_SPEED: Duration = Duration::from_millis(50);
/// Default tick cap for non-sequential cycles.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;
/// Default share of the element that must be on screen to trigger view mode.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.1;

/// What starts a reveal cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimateOn {
    /// Pointer enters the element; leaving it resets.
    #[default]
    Hover,
    /// First time the element becomes visible; runs once.
    View,
    /// Repeats forever with pauses between cycles.
    Loop,
}

impl AnimateOn {
    /// Stable lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::View => "view",
            Self::Loop => "loop",
        }
    }
}

impl FromStr for AnimateOn {
    type Err = TriggerParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hover" => Ok(Self::Hover),
            "view" => Ok(Self::View),
            "loop" => Ok(Self::Loop),
            _ => Err(TriggerParseError(s.to_string())),
        }
    }
}

impl fmt::Display for AnimateOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pauses around each loop-mode cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTiming {
    /// Wait before the first cycle after entering loop mode.
    pub initial_delay: Duration,
    /// How long the finished text stays up before it is reset.
    pub hold: Duration,
    /// Wait between the reset and the next cycle.
    pub pause: Duration,
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            hold: Duration::from_secs(3),
            pause: Duration::from_secs(2),
        }
    }
}

/// Where substitution glyphs come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterSource {
    /// A fixed alphabet string.
    Fixed(String),
    /// The distinct non-space characters of the target text.
    OriginalText,
}

impl Default for CharacterSource {
    fn default() -> Self {
        Self::Fixed(DEFAULT_CHARACTERS.to_string())
    }
}

/// Configuration for a [`DecryptedText`](crate::DecryptedText).
///
/// Built from a target text plus builder calls; every option has a default.
///
/// ```
/// use std::time::Duration;
/// use unveil::{AnimateOn, DecryptConfig, RevealDirection};
///
/// let config = DecryptConfig::new("Welcome")
///     .speed(Duration::from_millis(150))
///     .sequential(true)
///     .reveal_direction(RevealDirection::Center)
///     .animate_on(AnimateOn::View);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecryptConfig {
    /// Final text to reveal.
    pub text: String,
    /// Tick interval.
    pub speed: Duration,
    /// Ticks before a non-sequential cycle stops.
    pub max_iterations: u32,
    /// Lock positions one per tick in [`reveal_direction`](Self::reveal_direction) order.
    pub sequential: bool,
    /// Reveal order for sequential mode.
    pub reveal_direction: RevealDirection,
    /// Substitution glyph source.
    pub characters: CharacterSource,
    /// Trigger mode.
    pub animate_on: AnimateOn,
    /// Visible share of the element that triggers view mode.
    pub visibility_threshold: f32,
    /// Loop-mode pauses.
    pub loop_timing: LoopTiming,
}

impl DecryptConfig {
    /// Defaults for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speed: DEFAULT_SPEED,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            sequential: false,
            reveal_direction: RevealDirection::Start,
            characters: CharacterSource::default(),
            animate_on: AnimateOn::Hover,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            loop_timing: LoopTiming::default(),
        }
    }

    #[must_use]
    pub fn speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = n;
        self
    }

    #[must_use]
    pub fn sequential(mut self, on: bool) -> Self {
        self.sequential = on;
        self
    }

    #[must_use]
    pub fn reveal_direction(mut self, direction: RevealDirection) -> Self {
        self.reveal_direction = direction;
        self
    }

    /// Sample substitutions from the text's own characters instead of the
    /// fixed alphabet.
    #[must_use]
    pub fn use_original_chars_only(mut self, on: bool) -> Self {
        if on {
            self.characters = CharacterSource::OriginalText;
        } else if self.characters == CharacterSource::OriginalText {
            self.characters = CharacterSource::default();
        }
        self
    }

    /// Fixed alphabet to sample substitutions from.
    #[must_use]
    pub fn characters(mut self, characters: impl Into<String>) -> Self {
        self.characters = CharacterSource::Fixed(characters.into());
        self
    }

    #[must_use]
    pub fn animate_on(mut self, mode: AnimateOn) -> Self {
        self.animate_on = mode;
        self
    }

    #[must_use]
    pub fn visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    #[must_use]
    pub fn loop_timing(mut self, timing: LoopTiming) -> Self {
        self.loop_timing = timing;
        self
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<()> {
        if self.speed.is_zero() {
            return Err(ConfigError::ZeroSpeed);
        }
        if let CharacterSource::Fixed(chars) = &self.characters
            && chars.is_empty()
        {
            return Err(ConfigError::EmptyAlphabet);
        }
        let t = self.visibility_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ConfigError::InvalidThreshold(t));
        }
        Ok(())
    }

    /// Alphabet implied by [`characters`](Self::characters).
    pub fn alphabet(&self) -> Alphabet {
        match &self.characters {
            CharacterSource::Fixed(chars) => Alphabet::from_characters(chars),
            CharacterSource::OriginalText => Alphabet::from_text(&self.text),
        }
    }
}
