use std::fmt::{self, Display};

/// An SSA register. Every version of a source-level local gets its own
/// register, so the number is unique within a method.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Reg(pub usize);

impl Reg {
    /// The highest register number a listing may name. The target addresses
    /// registers with 16 bits.
    pub const MAX: usize = u16::MAX as usize;
}

impl Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// The number of consecutive target slots a value occupies.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Category {
    #[default]
    Single,
    Double,
}

impl Category {
    pub fn width(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.width())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Type {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Float,
    Long,
    Double,
    Object,
}

impl Type {
    pub const ALL: [Type; 9] = [
        Self::Boolean,
        Self::Byte,
        Self::Char,
        Self::Short,
        Self::Int,
        Self::Float,
        Self::Long,
        Self::Double,
        Self::Object,
    ];

    /// Wide numeric types take two slots, everything else takes one.
    pub fn category(&self) -> Category {
        match self {
            Self::Long | Self::Double => Category::Double,
            _ => Category::Single,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Float => "float",
            Self::Long => "long",
            Self::Double => "double",
            Self::Object => "object",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A register together with the type of the value it holds and, if the
/// register corresponds to a source-level variable, the name of that variable.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RegisterSpec {
    pub reg: Reg,
    pub ty: Type,
    pub local: Option<String>,
}

impl RegisterSpec {
    pub fn new(reg: Reg, ty: Type) -> Self {
        Self {
            reg,
            ty,
            local: None,
        }
    }

    pub fn with_local(self, local: impl Into<String>) -> Self {
        Self {
            local: Some(local.into()),
            ..self
        }
    }

    pub fn category(&self) -> Category {
        self.ty.category()
    }
}

impl Display for RegisterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.reg, self.ty)?;
        if let Some(local) = &self.local {
            write!(f, "({local})")?;
        }

        Ok(())
    }
}
