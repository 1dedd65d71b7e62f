use std::collections::HashMap;

use crate::contract::model::{Ingredient, ShoppingList, ShoppingListLine};
use crate::domain::model::IngredientLine;

/// Sum amounts per ingredient id.
pub fn accumulate<I>(lines: I) -> HashMap<i32, i64>
where
    I: IntoIterator<Item = IngredientLine>,
{
    let mut totals: HashMap<i32, i64> = HashMap::new();
    for line in lines {
        *totals.entry(line.ingredient_id).or_default() += i64::from(line.amount);
    }
    totals
}

/// Resolve totals against the catalog and order lines by name, then id.
///
/// Totals whose ingredient is not in `catalog` are dropped.
pub fn build(totals: &HashMap<i32, i64>, catalog: Vec<Ingredient>) -> ShoppingList {
    let mut resolved: Vec<(Ingredient, i64)> = catalog
        .into_iter()
        .filter_map(|ing| totals.get(&ing.id).map(|&total| (ing, total)))
        .collect();
    resolved.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    ShoppingList {
        lines: resolved
            .into_iter()
            .map(|(ing, amount)| ShoppingListLine {
                name: ing.name,
                measurement_unit: ing.measurement_unit,
                amount,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ing(id: i32, name: &str, unit: &str) -> Ingredient {
        Ingredient {
            id,
            name: name.into(),
            measurement_unit: unit.into(),
        }
    }

    fn line(ingredient_id: i32, amount: i32) -> IngredientLine {
        IngredientLine {
            ingredient_id,
            amount,
        }
    }

    fn catalog() -> Vec<Ingredient> {
        vec![ing(1, "flour", "g"), ing(2, "salt", "g"), ing(3, "sugar", "g")]
    }

    #[test]
    fn sums_across_recipes_independent_of_order() {
        let recipe_a = [line(1, 200), line(2, 5)];
        let recipe_b = [line(1, 100), line(3, 50)];

        let forward = accumulate(recipe_a.iter().chain(recipe_b.iter()).copied());
        let backward = accumulate(recipe_b.iter().chain(recipe_a.iter()).copied());
        assert_eq!(forward, backward);

        let list = build(&forward, catalog());
        assert_eq!(list.render(), "flour: 300 g\nsalt: 5 g\nsugar: 50 g\n");
        assert_eq!(list.lines.len(), 3);
    }

    #[test]
    fn empty_cart_gives_empty_document() {
        let list = build(&accumulate(Vec::new()), catalog());
        assert!(list.is_empty());
        assert_eq!(list.render(), "");
    }

    #[test]
    fn same_name_is_ordered_by_id() {
        let totals = accumulate([line(9, 1), line(4, 2)]);
        let list = build(&totals, vec![ing(9, "milk", "ml"), ing(4, "milk", "l")]);
        assert_eq!(list.render(), "milk: 2 l\nmilk: 1 ml\n");
    }

    #[test]
    fn totals_do_not_overflow_i32() {
        let totals = accumulate([line(1, i32::MAX), line(1, i32::MAX)]);
        assert_eq!(totals[&1], 2 * i64::from(i32::MAX));
    }
}
