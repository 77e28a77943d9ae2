use serde::Deserialize;
use validator::Validate;

use crate::domain::course::{NewBranch, NewCourse};
use crate::domain::types::{
    BranchAddress, BranchName, CourseName, PositiveSmallInt, FreeText,
};
use crate::forms::{FormError, invalid};

#[derive(Debug, Deserialize, Validate)]
/// Form data for a course offering.
pub struct CourseForm {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    pub price: i32,
    /// Duration in months.
    pub period: i32,
    #[validate(length(min = 1))]
    pub outline: String,
}

impl TryFrom<CourseForm> for NewCourse {
    type Error = FormError;

    fn try_from(form: CourseForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewCourse::new(
            CourseName::new(form.name).map_err(invalid("name"))?,
            PositiveSmallInt::new(form.price).map_err(invalid("price"))?,
            PositiveSmallInt::new(form.period).map_err(invalid("period"))?,
            FreeText::new(form.outline).map_err(invalid("outline"))?,
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for a campus.
pub struct BranchForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 128))]
    pub addr: String,
}

impl TryFrom<BranchForm> for NewBranch {
    type Error = FormError;

    fn try_from(form: BranchForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewBranch::new(
            BranchName::new(form.name).map_err(invalid("name"))?,
            BranchAddress::new(form.addr).map_err(invalid("addr"))?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_form_rejects_price_beyond_small_int() {
        let form = CourseForm {
            name: "Linux 运维".to_string(),
            price: 40_000,
            period: 5,
            outline: "shell, networking".to_string(),
        };

        let err = NewCourse::try_from(form).unwrap_err();
        assert!(matches!(err, FormError::InvalidField { field: "price", .. }));
    }

    #[test]
    fn branch_form_into_domain() {
        let form = BranchForm {
            name: "北京沙河校区".to_string(),
            addr: "昌平区沙河镇".to_string(),
        };

        let branch = NewBranch::try_from(form).expect("valid branch");
        assert_eq!(branch.name.as_str(), "北京沙河校区");
    }
}
