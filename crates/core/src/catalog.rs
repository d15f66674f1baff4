//! Ordered, read-only sequence of lesson concepts.

use std::collections::HashSet;
use thiserror::Error;

use crate::model::{Concept, ConceptError, ConceptId, Question, TieredQuestions};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one concept")]
    Empty,

    #[error("duplicate concept id: {0}")]
    DuplicateId(ConceptId),

    #[error(transparent)]
    Concept(#[from] ConceptError),
}

/// The lesson's concepts in teaching order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    concepts: Vec<Concept>,
}

impl Catalog {
    /// Build a catalog from concepts in teaching order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for no concepts and
    /// `CatalogError::DuplicateId` if two concepts share an id.
    pub fn new(concepts: Vec<Concept>) -> Result<Self, CatalogError> {
        if concepts.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(concepts.len());
        for concept in &concepts {
            if !seen.insert(concept.id().as_str()) {
                return Err(CatalogError::DuplicateId(concept.id().clone()));
            }
        }
        Ok(Self { concepts })
    }

    #[must_use]
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.concepts.len().saturating_sub(1)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Concept> {
        self.concepts.get(index)
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.concepts.iter().position(|concept| concept.id() == id)
    }

    /// Concept following `id` in teaching order.
    #[must_use]
    pub fn next_after(&self, id: &str) -> Option<&Concept> {
        self.position(id).and_then(|index| self.concepts.get(index + 1))
    }

    /// The built-in "Motion in One Dimension" physics lesson.
    ///
    /// # Panics
    ///
    /// Panics if the built-in lesson data is malformed.
    #[must_use]
    pub fn physics_motion() -> Self {
        build_physics_motion().expect("built-in physics catalog should be valid")
    }
}

struct QuestionSpec {
    text: &'static str,
    options: &'static [&'static str],
    correct: usize,
    feedback: &'static str,
}

struct ConceptSpec {
    id: &'static str,
    title: &'static str,
    label: &'static str,
    explanation: &'static str,
    diagram: &'static str,
    visual: &'static str,
    standard: QuestionSpec,
    remedial: QuestionSpec,
    advanced: QuestionSpec,
}

impl QuestionSpec {
    fn build(&self) -> Result<Question, ConceptError> {
        Question::new(
            self.text,
            self.options.iter().copied(),
            self.correct,
            self.feedback,
        )
    }
}

impl ConceptSpec {
    fn build(&self) -> Result<Concept, ConceptError> {
        let questions = TieredQuestions {
            standard: self.standard.build()?,
            remedial: self.remedial.build()?,
            advanced: self.advanced.build()?,
        };
        Ok(Concept::new(
            self.id,
            self.title,
            self.label,
            self.explanation,
            self.diagram,
            questions,
        )?
        .with_additional_visual(self.visual))
    }
}

fn build_physics_motion() -> Result<Catalog, CatalogError> {
    let concepts = PHYSICS_MOTION
        .iter()
        .map(ConceptSpec::build)
        .collect::<Result<Vec<_>, _>>()?;
    Catalog::new(concepts)
}

const PHYSICS_MOTION: &[ConceptSpec] = &[
    ConceptSpec {
        id: "motion",
        title: "What is Motion?",
        label: "Motion Basics",
        explanation: "Motion occurs when an object changes its position over time relative to a reference point. Everything in the universe is in motion, from the smallest atoms to the largest galaxies.",
        diagram: "/diagrams/motion_reference.png",
        visual: "Think of a passenger in a moving train. To someone inside, they are still. To someone outside, they are moving.",
        standard: QuestionSpec {
            text: "Which of these best describes motion?",
            options: &[
                "Staying in the same place forever",
                "Changing position with time",
                "Moving only in a circle",
                "Having a constant speed",
            ],
            correct: 1,
            feedback: "Motion is purely about position changing over time.",
        },
        remedial: QuestionSpec {
            text: "If you walk from your chair to the door, have you experienced motion?",
            options: &[
                "No, because I am still inside",
                "Yes, because my position changed",
                "Only if I run",
            ],
            correct: 1,
            feedback: "Any change in position is considered motion.",
        },
        advanced: QuestionSpec {
            text: "A passenger sitting in a moving train is at rest relative to...",
            options: &[
                "The train engine",
                "The platform outside",
                "The stars",
                "A bird flying past",
            ],
            correct: 0,
            feedback: "Motion is relative. Relative to the train itself, the passenger isn't moving.",
        },
    },
    ConceptSpec {
        id: "velocity",
        title: "Instantaneous Velocity",
        label: "Velocity",
        explanation: "Instantaneous velocity is the speed of an object at a specific moment in time. Think of it like checking your car speedometer at a single glance while driving.",
        diagram: "/diagrams/xt_graph_tangent.png",
        visual: "Imagine a radar gun pointing at a car. It captures the speed at that exact millisecond.",
        standard: QuestionSpec {
            text: "What does a speedometer measure?",
            options: &[
                "Average velocity",
                "Total distance",
                "Instantaneous speed",
                "Acceleration",
            ],
            correct: 2,
            feedback: "It shows speed at that exact instant, not an average.",
        },
        remedial: QuestionSpec {
            text: "Does instantaneous velocity change during a long trip?",
            options: &[
                "Yes, it changes whenever speed changes",
                "No, it is always the same as average",
                "Only if you stop",
            ],
            correct: 0,
            feedback: "It changes constantly as you drive, speed up, or slow down.",
        },
        advanced: QuestionSpec {
            text: "On a position-time graph, instantaneous velocity is represented by...",
            options: &[
                "The area under the curve",
                "The slope of the tangent at a point",
                "The total length of the line",
                "The y-intercept",
            ],
            correct: 1,
            feedback: "The slope of the tangent line gives the derivative (velocity) at that point.",
        },
    },
    ConceptSpec {
        id: "acceleration",
        title: "Acceleration",
        label: "Acceleration",
        explanation: "Acceleration is the rate at which velocity changes. If you speed up, slow down, or change direction, you are accelerating.",
        diagram: "/diagrams/vt_graph_slope.png",
        visual: "A rollercoaster turning a loop at constant speed is still accelerating because its direction is changing.",
        standard: QuestionSpec {
            text: "If a car turns a corner at constant speed, is it accelerating?",
            options: &[
                "Yes, because direction changes",
                "No, speed is constant",
                "Only if it speeds up",
                "Only if it crashes",
            ],
            correct: 0,
            feedback: "Velocity is speed + direction, so changing direction counts as acceleration.",
        },
        remedial: QuestionSpec {
            text: "Which of these is NOT acceleration?",
            options: &[
                "Pressing the gas pedal",
                "Pressing the brake",
                "Driving in a straight line at 50km/h",
                "Turning a steering wheel",
            ],
            correct: 2,
            feedback: "Constant speed in a straight line means zero acceleration.",
        },
        advanced: QuestionSpec {
            text: "If velocity is positive and acceleration is negative, the object is...",
            options: &["Speeding up", "Slowing down", "Moving backwards", "Stopped"],
            correct: 1,
            feedback: "When signs oppose (pushing against motion), the object slows down.",
        },
    },
    ConceptSpec {
        id: "equations",
        title: "Equations of Motion",
        label: "Equations",
        explanation: "There are three key equations that link velocity, displacement, acceleration, and time. These only apply when acceleration is constant (uniform).",
        diagram: "/diagrams/equations_flow.png",
        visual: "Think of dropping a ball (constant gravity) vs driving in traffic (variable acceleration). Equations only work for the ball.",
        standard: QuestionSpec {
            text: "When can we use the standard equations (v = u + at, etc.)?",
            options: &[
                "Always",
                "When acceleration varies",
                "When speed is zero",
                "When acceleration is constant",
            ],
            correct: 3,
            feedback: "Uniform (constant) acceleration is the key condition.",
        },
        remedial: QuestionSpec {
            text: "Do these equations work for a car in heavy traffic (stop-and-go)?",
            options: &["Yes", "No, because acceleration changes wildly", "Only at night"],
            correct: 1,
            feedback: "Traffic implies variable acceleration, so the simple equations don't apply.",
        },
        advanced: QuestionSpec {
            text: "Which equation relates Velocity, Displacement, and Acceleration (no Time)?",
            options: &["v = u + at", "s = ut + ½at²", "v² - u² = 2as", "v = s/t"],
            correct: 2,
            feedback: "v² - u² = 2as is the correct time-independent equation.",
        },
    },
    ConceptSpec {
        id: "freefall",
        title: "Free Fall",
        label: "Free Fall",
        explanation: "Free fall is motion under the influence of gravity alone. Near Earth, all objects accelerate downwards at the same rate (9.8 m/s²), regardless of their mass.",
        diagram: "/diagrams/free_fall_graphs.png",
        visual: "Apollo 15 astronaut dropped a hammer and feather on the Moon. They hit the ground at the exact same time.",
        standard: QuestionSpec {
            text: "In a vacuum, which falls faster: a feather or a hammer?",
            options: &[
                "The hammer",
                "The feather",
                "They fall at the same rate",
                "Neither falls",
            ],
            correct: 2,
            feedback: "Gravity acts equally on all mass in a vacuum.",
        },
        remedial: QuestionSpec {
            text: "Why does a feather fall slowly on Earth?",
            options: &[
                "It has no mass",
                "Air resistance slows it down",
                "Gravity ignores feathers",
            ],
            correct: 1,
            feedback: "Air resistance is the culprit, not gravity.",
        },
        advanced: QuestionSpec {
            text: "A ball is thrown upward. At the very top of its path, its velocity is zero. What is its acceleration?",
            options: &[
                "Zero",
                "9.8 m/s² downwards",
                "9.8 m/s² upwards",
                "Depends on the mass",
            ],
            correct: 1,
            feedback: "Gravity never stops acting, even when the object stops momentarily.",
        },
    },
];
