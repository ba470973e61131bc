/// The closed set of expense labels offered by the input form. The server
/// stores whatever label it is given; only the form restricts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FoodDining,
    Transportation,
    Shopping,
    Entertainment,
    BillsUtilities,
    Healthcare,
    Education,
    Travel,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup by full label or a one-word alias
    /// (`food`, `bills`, `transport`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if let Some(cat) = Self::all().iter().find(|c| c.as_str().to_lowercase() == lower) {
            return Some(*cat);
        }
        match lower.as_str() {
            "food" | "dining" => Some(Self::FoodDining),
            "transport" => Some(Self::Transportation),
            "bills" | "utilities" => Some(Self::BillsUtilities),
            "health" => Some(Self::Healthcare),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::FoodDining,
            Self::Transportation,
            Self::Shopping,
            Self::Entertainment,
            Self::BillsUtilities,
            Self::Healthcare,
            Self::Education,
            Self::Travel,
            Self::Other,
        ]
    }

    /// Position in `all()`, used by the form's category picker.
    pub fn index(&self) -> usize {
        Self::all().iter().position(|c| c == self).unwrap_or(0)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
