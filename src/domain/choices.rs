//! Closed enumerations stored as small integers.
//!
//! Each enumeration carries its persisted code and display label. Codes
//! outside the declared set are rejected on conversion, so a value read from
//! or written to the store is always a member of its set.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i16", into = "i16")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Code/label pairs in declaration order.
            pub const CHOICES: &'static [(i16, &'static str)] = &[$(($value, $label)),+];

            /// Every member in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Persisted code.
            pub const fn value(self) -> i16 {
                match self {
                    $($name::$variant => $value),+
                }
            }

            /// Human-readable label.
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl TryFrom<i16> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i16) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)+
                    other => Err(TypeConstraintError::InvalidChoice {
                        field: $field,
                        value: other,
                    }),
                }
            }
        }

        impl From<$name> for i16 {
            fn from(value: $name) -> Self {
                value.value()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }
    };
}

choice_enum! {
    /// Channel through which a lead reached the institute.
    LeadSource, "lead source" {
        Referral = 0 => "转介绍",
        QqGroup = 1 => "QQ群",
        Website = 2 => "官网",
        BaiduAds = 3 => "百度推广",
        Cto51 = 4 => "51CTO",
        Zhihu = 5 => "知乎",
        Marketing = 6 => "市场推广",
    }
}

choice_enum! {
    /// Sales intention recorded on a follow-up.
    IntentionStatus, "intention" {
        WithinTwoWeeks = 0 => "2周内报名",
        WithinOneMonth = 1 => "1个月内报名",
        NoPlan = 2 => "近期无报名计划",
        EnrolledElsewhere = 3 => "已在其他机构报名",
        Enrolled = 4 => "已报名",
        Blacklisted = 5 => "已拉黑",
    }
}

choice_enum! {
    /// Delivery mode of a class.
    ClassType, "class type" {
        Weekend = 0 => "周末面授",
        FullTime = 1 => "脱产面授",
        Online = 2 => "网络",
    }
}

choice_enum! {
    /// Attendance mark for a student in a session.
    #[derive(Default)]
    AttendanceStatus, "attendance" {
        #[default]
        Present = 0 => "签到",
        Late = 1 => "迟到",
        Absent = 2 => "缺勤",
        LeftEarly = 3 => "早退",
    }
}

choice_enum! {
    /// Grade bucket for a session. Negative codes are penalties.
    ScoreGrade, "score" {
        APlus = 100 => "A+",
        A = 90 => "A",
        BPlus = 85 => "B+",
        B = 80 => "B",
        BMinus = 75 => "B-",
        CPlus = 70 => "C+",
        C = 60 => "C",
        CMinus = 40 => "C-",
        NotAvailable = 0 => "N/A",
        D = -50 => "D",
        Copy = -100 => "COPY",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_source_accepts_only_declared_codes() {
        for code in 0..=6 {
            let source = LeadSource::try_from(code).expect("declared code");
            assert_eq!(source.value(), code);
        }
        assert_eq!(
            LeadSource::try_from(7),
            Err(TypeConstraintError::InvalidChoice {
                field: "lead source",
                value: 7
            })
        );
        assert!(LeadSource::try_from(-1).is_err());
    }

    #[test]
    fn score_grade_rejects_values_outside_buckets() {
        for code in [100, 90, 85, 80, 75, 70, 60, 40, 0, -50, -100] {
            assert!(ScoreGrade::try_from(code).is_ok(), "{code} should be valid");
        }
        for code in [99, 50, 1, -1, -99, 101] {
            assert!(ScoreGrade::try_from(code).is_err(), "{code} should be invalid");
        }
    }

    #[test]
    fn labels_match_choice_table() {
        for grade in ScoreGrade::ALL {
            assert!(ScoreGrade::CHOICES.contains(&(grade.value(), grade.label())));
        }
        assert_eq!(ScoreGrade::Copy.to_string(), "COPY");
        assert_eq!(ClassType::Online.label(), "网络");
        assert_eq!(IntentionStatus::CHOICES.len(), 6);
        assert_eq!(AttendanceStatus::default(), AttendanceStatus::Present);
    }

    #[test]
    fn choices_serialize_as_codes() {
        let json = serde_json::to_string(&ScoreGrade::D).expect("serializes");
        assert_eq!(json, "-50");

        let parsed: Result<LeadSource, _> = serde_json::from_str("9");
        assert!(parsed.is_err());

        let parsed: ClassType = serde_json::from_str("1").expect("valid class type");
        assert_eq!(parsed, ClassType::FullTime);
    }
}
