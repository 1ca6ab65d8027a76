//! Line configuration types and builder

use core::fmt;

pub use crate::error::{BuilderError, MAX_LINE_NUMBER};

/// Validated GPIO line number
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineNumber(u8);

impl LineNumber {
    /// Create a line number with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidLineNumber` if `number > MAX_LINE_NUMBER`
    pub fn new(number: u16) -> Result<Self, BuilderError> {
        if number > MAX_LINE_NUMBER {
            return Err(BuilderError::InvalidLineNumber(number));
        }
        Ok(Self(number as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Line direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    In,
    Out,
}

impl Direction {
    /// Payload written to the `direction` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interrupt edge for input lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Edge {
    #[default]
    None,
    Rising,
    Falling,
    Both,
}

impl Edge {
    /// Payload written to the `edge` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            Edge::None => "none",
            Edge::Rising => "rising",
            Edge::Falling => "falling",
            Edge::Both => "both",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// sysfs attribute files touched by the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    /// `<root>/export`, shared by all lines
    Export,
    Direction,
    Edge,
    Value,
}

impl Attribute {
    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Export => "export",
            Attribute::Direction => "direction",
            Attribute::Edge => "edge",
            Attribute::Value => "value",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line configuration
///
/// Use `Builder` to create a LineConfig.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineConfig {
    pub number: LineNumber,
    pub direction: Direction,
    /// Always `Edge::None` for outputs
    pub edge: Edge,
}

impl LineConfig {
    /// Output line with no edge trigger
    pub fn output(number: u16) -> Result<Self, BuilderError> {
        Builder::new().line(number).direction(Direction::Out).build()
    }

    /// Input line with the given edge trigger
    pub fn input(number: u16, edge: Edge) -> Result<Self, BuilderError> {
        Builder::new()
            .line(number)
            .direction(Direction::In)
            .edge(edge)
            .build()
    }
}

/// Builder for constructing a line configuration
///
/// # Example
///
/// ```
/// use gpio_sysfs::{Builder, Direction, Edge};
///
/// let config = Builder::new()
///     .line(88)
///     .direction(Direction::In)
///     .edge(Edge::Rising)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.number.get(), 88);
/// ```
#[derive(Default)]
pub struct Builder {
    line: Option<u16>,
    direction: Direction,
    edge: Edge,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line number (required)
    pub fn line(mut self, number: u16) -> Self {
        self.line = Some(number);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn edge(mut self, edge: Edge) -> Self {
        self.edge = edge;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// - `BuilderError::MissingLine` if no line number was set
    /// - `BuilderError::InvalidLineNumber` if it does not fit two digits
    /// - `BuilderError::EdgeOnOutput` if an edge was requested for an output
    pub fn build(self) -> Result<LineConfig, BuilderError> {
        let number = LineNumber::new(self.line.ok_or(BuilderError::MissingLine)?)?;
        if self.direction == Direction::Out && self.edge != Edge::None {
            return Err(BuilderError::EdgeOnOutput(self.edge));
        }
        Ok(LineConfig {
            number,
            direction: self.direction,
            edge: self.edge,
        })
    }
}
