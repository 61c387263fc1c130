//! Presentation page transitions
//!
//! Transitions are written to the page's `/Trans` dictionary and are played
//! by viewers in presentation (full screen) mode when the page is shown.

use lopdf::{Dictionary, Object};
use std::time::Duration;

/// Direction of motion of the incoming page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Right to left
    Left,
    /// Left to right
    Right,
    /// Bottom to top
    Up,
    /// Top to bottom
    Down,
}

impl Direction {
    /// Angle in degrees, counterclockwise from left-to-right
    pub fn degrees(self) -> i64 {
        match self {
            Direction::Right => 0,
            Direction::Up => 90,
            Direction::Left => 180,
            Direction::Down => 270,
        }
    }
}

/// Orientation of split and blinds effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    fn name(self) -> &'static str {
        match self {
            Orientation::Horizontal => "H",
            Orientation::Vertical => "V",
        }
    }
}

/// Whether a split opens from the center outward or closes inward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    In,
    Out,
}

impl Motion {
    fn name(self) -> &'static str {
        match self {
            Motion::In => "I",
            Motion::Out => "O",
        }
    }
}

/// Transition effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Fade,
    Push(Direction),
    Wipe(Direction),
    Cover(Direction),
    Split {
        orientation: Orientation,
        motion: Motion,
    },
    Blinds(Orientation),
    Dissolve,
}

impl TransitionKind {
    /// PDF transition style name (`/S`)
    pub fn style_name(&self) -> &'static str {
        match self {
            TransitionKind::Fade => "Fade",
            TransitionKind::Push(_) => "Push",
            TransitionKind::Wipe(_) => "Wipe",
            TransitionKind::Cover(_) => "Cover",
            TransitionKind::Split { .. } => "Split",
            TransitionKind::Blinds(_) => "Blinds",
            TransitionKind::Dissolve => "Dissolve",
        }
    }
}

/// Transition speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl TransitionSpeed {
    /// Effect duration in seconds
    pub fn seconds(self) -> f32 {
        match self {
            TransitionSpeed::Slow => 1.0,
            TransitionSpeed::Medium => 0.75,
            TransitionSpeed::Fast => 0.5,
        }
    }
}

/// A page transition
///
/// Pages always advance on click; `advance_after` additionally advances
/// automatically once the page has been shown for that long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub speed: TransitionSpeed,
    pub advance_after: Option<Duration>,
}

impl Transition {
    pub fn new(kind: TransitionKind, speed: TransitionSpeed) -> Self {
        Self {
            kind,
            speed,
            advance_after: None,
        }
    }

    /// Auto-advance after `duration`
    pub fn advance_after(mut self, duration: Duration) -> Self {
        self.advance_after = Some(duration);
        self
    }

    /// Build the `/Trans` dictionary
    pub fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Trans".to_vec()));
        dict.set(
            "S",
            Object::Name(self.kind.style_name().as_bytes().to_vec()),
        );
        dict.set("D", Object::Real(self.speed.seconds()));

        match self.kind {
            TransitionKind::Push(dir) | TransitionKind::Wipe(dir) | TransitionKind::Cover(dir) => {
                dict.set("Di", Object::Integer(dir.degrees()));
            }
            TransitionKind::Split {
                orientation,
                motion,
            } => {
                dict.set("Dm", Object::Name(orientation.name().as_bytes().to_vec()));
                dict.set("M", Object::Name(motion.name().as_bytes().to_vec()));
            }
            TransitionKind::Blinds(orientation) => {
                dict.set("Dm", Object::Name(orientation.name().as_bytes().to_vec()));
            }
            TransitionKind::Fade | TransitionKind::Dissolve => {}
        }

        dict
    }

    /// Page display duration (`/Dur`) in seconds, if auto-advancing
    pub fn display_seconds(&self) -> Option<f32> {
        self.advance_after.map(|d| d.as_secs_f32())
    }
}
