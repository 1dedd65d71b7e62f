//! Validation of a recipe submission's tag set, ingredient lines and inline image.
//!
//! Everything here is pure: existence of the referenced tags and ingredients is checked by
//! the service against the catalog, and persistence happens in one repository transaction.

use std::collections::HashSet;

use base64::{engine::general_purpose, Engine as _};
use uuid::Uuid;

use crate::contract::model::{ImagePayload, IngredientAmount, RecipeDraft};
use crate::domain::error::DomainError;
use crate::domain::model::{Composition, IngredientLine, StoredImage};

pub const MIN_AMOUNT: i32 = 1;

const IMAGE_DIR: &str = "recipes/images";
const MAX_EXTENSION_LEN: usize = 10;

pub fn validate_composition(draft: &RecipeDraft) -> Result<Composition, DomainError> {
    Ok(Composition {
        tags: validate_tags(draft.tags.as_deref())?,
        ingredients: validate_ingredients(draft.ingredients.as_deref())?,
    })
}

/// Tag ids must be present, non-empty and unique. Order is preserved.
pub fn validate_tags(tags: Option<&[i32]>) -> Result<Vec<i32>, DomainError> {
    let tags = match tags {
        Some(t) if !t.is_empty() => t,
        _ => return Err(DomainError::empty_list("tags")),
    };

    let mut seen = HashSet::with_capacity(tags.len());
    for &id in tags {
        if !seen.insert(id) {
            return Err(DomainError::DuplicateTag { id });
        }
    }
    Ok(tags.to_vec())
}

/// Ingredient items must be present and non-empty; ids unique, amounts valid.
pub fn validate_ingredients(
    items: Option<&[IngredientAmount]>,
) -> Result<Vec<IngredientLine>, DomainError> {
    let items = match items {
        Some(i) if !i.is_empty() => i,
        _ => return Err(DomainError::empty_list("ingredients")),
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let amount = parse_amount(item.id, &item.amount)?;
        if !seen.insert(item.id) {
            return Err(DomainError::DuplicateIngredient { id: item.id });
        }
        lines.push(IngredientLine {
            ingredient_id: item.id,
            amount,
        });
    }
    Ok(lines)
}

/// Digits only, at least [`MIN_AMOUNT`], fits `i32`.
pub fn parse_amount(id: i32, raw: &str) -> Result<i32, DomainError> {
    let invalid = || DomainError::InvalidAmount {
        id,
        amount: raw.to_string(),
        min: MIN_AMOUNT,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match trimmed.parse::<i32>() {
        Ok(v) if v >= MIN_AMOUNT => Ok(v),
        _ => Err(invalid()),
    }
}

/// Ids from `requested` that are not in `existing`, without repeats.
pub fn missing_ids(requested: &[i32], existing: &HashSet<i32>) -> Vec<i32> {
    let mut seen = HashSet::new();
    requested
        .iter()
        .copied()
        .filter(|id| !existing.contains(id) && seen.insert(*id))
        .collect()
}

/// Turn a client payload into a named blob under `recipes/images/`.
pub fn decode_image(payload: &ImagePayload, max_bytes: usize) -> Result<StoredImage, DomainError> {
    let (ext, data) = match payload {
        ImagePayload::DataUri(uri) => decode_data_uri(uri)?,
        ImagePayload::Binary { file_name, content } => {
            let ext = file_name
                .rsplit_once('.')
                .map(|(_, ext)| ext)
                .ok_or_else(|| DomainError::invalid_image("file name has no extension"))?;
            (checked_extension(ext)?, content.clone())
        }
    };

    if data.is_empty() {
        return Err(DomainError::invalid_image("empty image"));
    }
    if data.len() > max_bytes {
        return Err(DomainError::invalid_image(format!(
            "image is {} bytes, limit is {max_bytes}",
            data.len()
        )));
    }

    Ok(StoredImage {
        name: format!("{IMAGE_DIR}/{}.{ext}", Uuid::new_v4()),
        data,
    })
}

fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), DomainError> {
    let (header, payload) = uri
        .trim()
        .split_once(";base64,")
        .ok_or_else(|| DomainError::invalid_image("expected data:image/<ext>;base64,<payload>"))?;
    let ext = header
        .strip_prefix("data:image/")
        .ok_or_else(|| DomainError::invalid_image("expected an image/* media type"))?;
    let ext = checked_extension(ext)?;

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let data = general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| DomainError::invalid_image(format!("bad base64 payload: {e}")))?;
    Ok((ext, data))
}

fn checked_extension(ext: &str) -> Result<String, DomainError> {
    let ext = ext.trim().to_ascii_lowercase();
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.bytes().all(|b| b.is_ascii_alphanumeric())
    {
        return Err(DomainError::invalid_image(format!(
            "unsupported extension '{ext}'"
        )));
    }
    Ok(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, amount: &str) -> IngredientAmount {
        IngredientAmount::new(id, amount)
    }

    #[test]
    fn tags_must_be_present_and_non_empty() {
        assert!(matches!(
            validate_tags(None),
            Err(DomainError::EmptyList { field: "tags" })
        ));
        assert!(matches!(
            validate_tags(Some(&[])),
            Err(DomainError::EmptyList { field: "tags" })
        ));
        assert_eq!(validate_tags(Some(&[3, 1])).unwrap(), vec![3, 1]);
    }

    #[test]
    fn duplicate_tags_are_rejected() {
        assert!(matches!(
            validate_tags(Some(&[1, 2, 1])),
            Err(DomainError::DuplicateTag { id: 1 })
        ));
    }

    #[test]
    fn ingredients_must_be_present_and_non_empty() {
        assert!(matches!(
            validate_ingredients(None),
            Err(DomainError::EmptyList {
                field: "ingredients"
            })
        ));
        assert!(matches!(
            validate_ingredients(Some(&[])),
            Err(DomainError::EmptyList {
                field: "ingredients"
            })
        ));
    }

    #[test]
    fn duplicate_ingredient_is_a_conflict() {
        let items = [item(5, "2"), item(7, "1"), item(5, "3")];
        assert!(matches!(
            validate_ingredients(Some(&items)),
            Err(DomainError::DuplicateIngredient { id: 5 })
        ));
    }

    #[test]
    fn amount_accepts_positive_integers_only() {
        assert_eq!(parse_amount(1, "1").unwrap(), 1);
        assert_eq!(parse_amount(1, "250").unwrap(), 250);
        assert_eq!(parse_amount(1, " 3 ").unwrap(), 3);

        for bad in ["0", "-1", "-5", "1.5", "abc", "", "  ", "+2", "99999999999"] {
            assert!(
                matches!(parse_amount(9, bad), Err(DomainError::InvalidAmount { id: 9, .. })),
                "amount {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn valid_lines_keep_submission_order() {
        let items = [item(4, "200"), item(2, "5")];
        let lines = validate_ingredients(Some(&items)).unwrap();
        assert_eq!(
            lines,
            vec![
                IngredientLine {
                    ingredient_id: 4,
                    amount: 200
                },
                IngredientLine {
                    ingredient_id: 2,
                    amount: 5
                },
            ]
        );
    }

    #[test]
    fn missing_ids_reports_each_unknown_once() {
        let existing: HashSet<i32> = [1, 2].into_iter().collect();
        assert_eq!(missing_ids(&[1, 3, 2, 3, 4], &existing), vec![3, 4]);
        assert!(missing_ids(&[1, 2], &existing).is_empty());
    }

    #[test]
    fn data_uri_is_decoded_with_declared_extension() {
        let uri = format!(
            "data:image/PNG;base64,{}",
            general_purpose::STANDARD.encode(b"\x89PNG fake")
        );
        let img = decode_image(&ImagePayload::DataUri(uri), 1024).unwrap();
        assert!(img.name.starts_with("recipes/images/"));
        assert!(img.name.ends_with(".png"));
        assert_eq!(img.data, b"\x89PNG fake");
    }

    #[test]
    fn binary_upload_takes_extension_from_file_name() {
        let payload = ImagePayload::Binary {
            file_name: "pie.jpeg".into(),
            content: vec![1, 2, 3],
        };
        let img = decode_image(&payload, 1024).unwrap();
        assert!(img.name.ends_with(".jpeg"));
        assert_eq!(img.data, vec![1, 2, 3]);
    }

    #[test]
    fn malformed_images_are_rejected() {
        let cases = [
            ImagePayload::DataUri("not a data uri".into()),
            ImagePayload::DataUri("data:text/plain;base64,aGVsbG8=".into()),
            ImagePayload::DataUri("data:image/png;base64,@@@".into()),
            ImagePayload::DataUri("data:image/p/ng;base64,aGVsbG8=".into()),
            ImagePayload::DataUri("data:image/png;base64,".into()),
            ImagePayload::Binary {
                file_name: "noext".into(),
                content: vec![1],
            },
        ];
        for case in cases {
            assert!(
                matches!(decode_image(&case, 1024), Err(DomainError::InvalidImage { .. })),
                "{case:?} should be rejected"
            );
        }
    }

    #[test]
    fn oversize_image_is_rejected() {
        let payload = ImagePayload::Binary {
            file_name: "big.png".into(),
            content: vec![0; 11],
        };
        assert!(matches!(
            decode_image(&payload, 10),
            Err(DomainError::InvalidImage { .. })
        ));
    }
}
