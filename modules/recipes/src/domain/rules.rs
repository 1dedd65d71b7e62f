use std::sync::OnceLock;

use regex::Regex;

use crate::contract::model::{NewIngredient, NewTag, NewUser};
use crate::domain::error::DomainError;

pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_USERNAME_LEN: usize = 150;
pub const MAX_PERSON_NAME_LEN: usize = 150;
pub const MAX_CATALOG_NAME_LEN: usize = 200;
pub const MAX_UNIT_LEN: usize = 200;

static USERNAME_RE: OnceLock<Option<Regex>> = OnceLock::new();
static COLOR_RE: OnceLock<Option<Regex>> = OnceLock::new();
static SLUG_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn is_match(cell: &OnceLock<Option<Regex>>, pattern: &str, value: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

fn required(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    if value.chars().count() > max {
        return Err(DomainError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

pub fn validate_new_user(user: &NewUser) -> Result<(), DomainError> {
    required("email", &user.email, MAX_EMAIL_LEN)?;
    let well_formed = user
        .email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        return Err(DomainError::validation("email", "invalid email address"));
    }

    required("username", &user.username, MAX_USERNAME_LEN)?;
    if !is_match(&USERNAME_RE, r"^[\w.@+-]+$", &user.username) {
        return Err(DomainError::validation(
            "username",
            "may contain only letters, digits and @/./+/-/_",
        ));
    }

    required("first_name", &user.first_name, MAX_PERSON_NAME_LEN)?;
    required("last_name", &user.last_name, MAX_PERSON_NAME_LEN)?;
    Ok(())
}

pub fn validate_new_tag(tag: &NewTag) -> Result<(), DomainError> {
    required("name", &tag.name, MAX_CATALOG_NAME_LEN)?;
    if !is_match(&COLOR_RE, r"^#[0-9A-Fa-f]{6}$", &tag.color) {
        return Err(DomainError::validation("color", "expected a #RRGGBB hex color"));
    }
    required("slug", &tag.slug, MAX_CATALOG_NAME_LEN)?;
    if !is_match(&SLUG_RE, r"^[-a-zA-Z0-9_]+$", &tag.slug) {
        return Err(DomainError::validation(
            "slug",
            "may contain only latin letters, digits, '-' and '_'",
        ));
    }
    Ok(())
}

pub fn validate_new_ingredient(ingredient: &NewIngredient) -> Result<(), DomainError> {
    required("name", &ingredient.name, MAX_CATALOG_NAME_LEN)?;
    required(
        "measurement_unit",
        &ingredient.measurement_unit,
        MAX_UNIT_LEN,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, username: &str) -> NewUser {
        NewUser {
            email: email.into(),
            username: username.into(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
        }
    }

    fn tag(color: &str, slug: &str) -> NewTag {
        NewTag {
            name: "Breakfast".into(),
            color: color.into(),
            slug: slug.into(),
        }
    }

    #[test]
    fn usernames_follow_the_allowed_alphabet() {
        assert!(validate_new_user(&user("ann@example.com", "ann.lee+1@x-y_z")).is_ok());
        assert!(validate_new_user(&user("ann@example.com", "ann lee")).is_err());
        assert!(validate_new_user(&user("ann@example.com", "ann/lee")).is_err());
        assert!(validate_new_user(&user("ann@example.com", "")).is_err());
    }

    #[test]
    fn emails_need_local_part_and_domain() {
        assert!(validate_new_user(&user("@example.com", "ann")).is_err());
        assert!(validate_new_user(&user("ann@localhost", "ann")).is_err());
        assert!(validate_new_user(&user("ann", "ann")).is_err());
    }

    #[test]
    fn tag_color_must_be_hex() {
        assert!(validate_new_tag(&tag("#E26C2D", "breakfast")).is_ok());
        assert!(validate_new_tag(&tag("#e26c2d", "breakfast")).is_ok());
        assert!(validate_new_tag(&tag("E26C2D", "breakfast")).is_err());
        assert!(validate_new_tag(&tag("#E26C2", "breakfast")).is_err());
        assert!(validate_new_tag(&tag("#E26C2DFF", "breakfast")).is_err());
        assert!(validate_new_tag(&tag("#GGGGGG", "breakfast")).is_err());
    }

    #[test]
    fn tag_slug_is_url_safe() {
        assert!(validate_new_tag(&tag("#000000", "late-lunch_2")).is_ok());
        assert!(validate_new_tag(&tag("#000000", "late lunch")).is_err());
    }

    #[test]
    fn ingredient_fields_are_required() {
        let ok = NewIngredient {
            name: "flour".into(),
            measurement_unit: "g".into(),
        };
        assert!(validate_new_ingredient(&ok).is_ok());
        let bad = NewIngredient {
            measurement_unit: " ".into(),
            ..ok
        };
        assert!(validate_new_ingredient(&bad).is_err());
    }
}
