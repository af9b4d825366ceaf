//! Plain-text rendering for CLI output.

use recipebook_core::{Recipe, RecipeDetail, SearchSummary};
use std::fmt::Display;

const BAR_WIDTH: usize = 30;

pub fn print_recipe_table(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes found.");
        return;
    }

    println!("{:<36}  {:<30}  {:>7}  {:<12}", "ID", "NAME", "MINUTES", "DIFFICULTY");
    for recipe in recipes {
        println!(
            "{:<36}  {:<30}  {:>7}  {:<12}",
            recipe.id,
            truncate(&recipe.name, 30),
            recipe.cooking_time,
            recipe.difficulty
        );
    }
}

pub fn print_recipe_detail(detail: &RecipeDetail) {
    let recipe = &detail.recipe;
    println!("{}", recipe.name);
    println!("  id:           {}", recipe.id);
    println!("  cooking time: {} min", recipe.cooking_time);
    println!("  difficulty:   {}", recipe.difficulty);
    println!("  ingredients:");
    if detail.ingredients.is_empty() {
        println!("    (none)");
    }
    for ingredient in &detail.ingredients {
        println!("    - {ingredient}");
    }
    if !recipe.description.trim().is_empty() {
        println!();
        println!("{}", recipe.description.trim());
    }
}

pub fn print_summary(summary: &SearchSummary) {
    print_bars("Recipes by difficulty", &summary.difficulty);
    print_bars("Recipes by cooking time", &summary.cooking_time);
    print_bars("Recipes created over time (cumulative)", &summary.growth);
}

fn print_bars<L: Display>(title: &str, series: &[(L, usize)]) {
    println!();
    println!("{title}");
    let max = series.iter().map(|(_, count)| *count).max().unwrap_or(0);
    for (label, count) in series {
        let width = if max == 0 { 0 } else { count * BAR_WIDTH / max };
        println!("  {:<22} {:>4} {}", label.to_string(), count, "#".repeat(width.max(1)));
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut shortened: String = value.chars().take(max_chars.saturating_sub(3)).collect();
    shortened.push_str("...");
    shortened
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate("Soup", 30), "Soup");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }
}
