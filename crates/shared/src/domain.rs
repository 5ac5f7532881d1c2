use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! field_names {
    ($($konst:ident => $wire:literal),+ $(,)?) => {
        $(pub const $konst: &str = $wire;)+
    };
}

field_names!(
    TOTAL_EXPERIENCE => "Total_Experience",
    TOTAL_EXPERIENCE_IN_FIELD => "Total_Experience_in_field_applied",
    CURRENT_CTC => "Current_CTC",
    NO_OF_COMPANIES_WORKED => "No_Of_Companies_worked",
    PASSING_YEAR_OF_GRADUATION => "Passing_Year_Of_Graduation",
    NUMBER_OF_PUBLICATIONS => "Number_of_Publications",
    CERTIFICATIONS => "Certifications",
    INTERNATIONAL_DEGREE_ANY => "International_degree_any",
    PASSING_YEAR_OF_PG => "Passing_Year_Of_PG",
    PASSING_YEAR_OF_PHD => "Passing_Year_Of_PHD",
    EDUCATION => "Education",
    DEPARTMENT => "Department",
    ROLE => "Role",
    INDUSTRY => "Industry",
    ORGANIZATION => "Organization",
    DESIGNATION => "Designation",
    GRADUATION_SPECIALIZATION => "Graduation_Specialization",
    UNIVERSITY_GRAD => "University_Grad",
    PG_SPECIALIZATION => "PG_Specialization",
    UNIVERSITY_PG => "University_PG",
    PHD_SPECIALIZATION => "PHD_Specialization",
    UNIVERSITY_PHD => "University_PHD",
    CURRENT_LOCATION => "Curent_Location",
    PREFERRED_LOCATION => "Preferred_location",
    INHAND_OFFER => "Inhand_Offer",
    LAST_APPRAISAL_RATING => "Last_Appraisal_Rating",
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Education {
    #[serde(rename = "Under Grad")]
    UnderGrad,
    #[default]
    Grad,
    #[serde(rename = "PG")]
    PostGrad,
    Doctorate,
}

impl Education {
    pub const ALL: [Education; 4] = [
        Education::UnderGrad,
        Education::Grad,
        Education::PostGrad,
        Education::Doctorate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Education::UnderGrad => "Under Grad",
            Education::Grad => "Grad",
            Education::PostGrad => "PG",
            Education::Doctorate => "Doctorate",
        }
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEducation(pub String);

impl FromStr for Education {
    type Err = UnknownEducation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Education::ALL
            .into_iter()
            .find(|level| level.as_str() == s.trim())
            .ok_or_else(|| UnknownEducation(s.to_string()))
    }
}

/// Declared `min`/`max` of a numeric input. A missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Float(NumericBounds),
    Integer(NumericBounds),
    /// 0/1 integer.
    Flag,
    /// Free text year that may be left empty.
    OptionalYear(NumericBounds),
    Select(&'static [&'static str]),
    Text,
}

impl FieldKind {
    pub fn bounds(&self) -> Option<NumericBounds> {
        match self {
            FieldKind::Float(bounds)
            | FieldKind::Integer(bounds)
            | FieldKind::OptionalYear(bounds) => Some(*bounds),
            FieldKind::Flag => Some(NumericBounds::new(0.0, 1.0)),
            FieldKind::Select(_) | FieldKind::Text => None,
        }
    }

    pub fn is_numeric_input(&self) -> bool {
        self.bounds().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Value a fresh form starts with.
    pub initial: &'static str,
}

const EDUCATION_OPTIONS: &[&str] = &["Under Grad", "Grad", "PG", "Doctorate"];
const INHAND_OFFER_OPTIONS: &[&str] = &["N", "Y"];
const APPRAISAL_OPTIONS: &[&str] = &["Key_Performer", "A", "B", "C", "D", "NaN"];

pub const FORM_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        name: TOTAL_EXPERIENCE,
        label: "Total experience (years)",
        kind: FieldKind::Float(NumericBounds::new(0.0, 50.0)),
        initial: "0",
    },
    FieldSpec {
        name: TOTAL_EXPERIENCE_IN_FIELD,
        label: "Experience in applied field (years)",
        kind: FieldKind::Float(NumericBounds::new(0.0, 50.0)),
        initial: "0",
    },
    FieldSpec {
        name: CURRENT_CTC,
        label: "Current CTC (INR)",
        kind: FieldKind::Float(NumericBounds::new(0.0, 10_000_000.0)),
        initial: "0",
    },
    FieldSpec {
        name: NO_OF_COMPANIES_WORKED,
        label: "Companies worked",
        kind: FieldKind::Integer(NumericBounds::new(0.0, 50.0)),
        initial: "0",
    },
    FieldSpec {
        name: PASSING_YEAR_OF_GRADUATION,
        label: "Graduation year",
        kind: FieldKind::Integer(NumericBounds::new(1970.0, 2030.0)),
        initial: "2020",
    },
    FieldSpec {
        name: NUMBER_OF_PUBLICATIONS,
        label: "Publications",
        kind: FieldKind::Integer(NumericBounds::new(0.0, 100.0)),
        initial: "0",
    },
    FieldSpec {
        name: CERTIFICATIONS,
        label: "Certifications",
        kind: FieldKind::Integer(NumericBounds::new(0.0, 50.0)),
        initial: "0",
    },
    FieldSpec {
        name: INTERNATIONAL_DEGREE_ANY,
        label: "International degree (0/1)",
        kind: FieldKind::Flag,
        initial: "0",
    },
    FieldSpec {
        name: EDUCATION,
        label: "Education",
        kind: FieldKind::Select(EDUCATION_OPTIONS),
        initial: "Grad",
    },
    FieldSpec {
        name: PASSING_YEAR_OF_PG,
        label: "PG passing year",
        kind: FieldKind::OptionalYear(NumericBounds::new(1970.0, 2030.0)),
        initial: "",
    },
    FieldSpec {
        name: PASSING_YEAR_OF_PHD,
        label: "PhD passing year",
        kind: FieldKind::OptionalYear(NumericBounds::new(1970.0, 2030.0)),
        initial: "",
    },
    FieldSpec {
        name: DEPARTMENT,
        label: "Department",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: ROLE,
        label: "Role",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: INDUSTRY,
        label: "Industry",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: ORGANIZATION,
        label: "Organization",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: DESIGNATION,
        label: "Designation",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: GRADUATION_SPECIALIZATION,
        label: "Graduation specialization",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: UNIVERSITY_GRAD,
        label: "Graduation university",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: PG_SPECIALIZATION,
        label: "PG specialization",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: UNIVERSITY_PG,
        label: "PG university",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: PHD_SPECIALIZATION,
        label: "PhD specialization",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: UNIVERSITY_PHD,
        label: "PhD university",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: CURRENT_LOCATION,
        label: "Current location",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: PREFERRED_LOCATION,
        label: "Preferred location",
        kind: FieldKind::Text,
        initial: "",
    },
    FieldSpec {
        name: INHAND_OFFER,
        label: "In-hand offer",
        kind: FieldKind::Select(INHAND_OFFER_OPTIONS),
        initial: "N",
    },
    FieldSpec {
        name: LAST_APPRAISAL_RATING,
        label: "Last appraisal rating",
        kind: FieldKind::Select(APPRAISAL_OPTIONS),
        initial: "NaN",
    },
];

pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FORM_SCHEMA.iter().find(|spec| spec.name == name)
}
