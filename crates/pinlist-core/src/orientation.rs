/// Main scroll axis of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    /// Parses the `scroll-orientation` prop value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "vertical" => Some(Orientation::Vertical),
            "horizontal" => Some(Orientation::Horizontal),
            _ => None,
        }
    }

    /// Picks the component of `(x, y)` that lies on this axis.
    pub fn main(self, x: f32, y: f32) -> f32 {
        match self {
            Orientation::Horizontal => x,
            Orientation::Vertical => y,
        }
    }
}
