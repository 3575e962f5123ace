use clap::Args;

use macrolog_core::{CaloriesLeftPolicy, NutritionStore, NutritionTracker};

use super::parse_date;

#[derive(Args)]
pub struct StatusCommand {
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    pub date: Option<String>,
}

impl StatusCommand {
    pub fn run<S: NutritionStore>(
        &self,
        tracker: &NutritionTracker<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let date = parse_date(&self.date)?;

        let consumed = tracker.consumed_calories(date);
        let left = tracker.calories_left(date);
        let percentage = tracker.calorie_percentage(date);

        println!("{}", date);
        println!("{}", "=".repeat(10));
        println!(
            "Calories: {:.0} / {:.0} kcal ({:.0}%)",
            consumed,
            tracker.total_calories(),
            percentage
        );
        if left < 0.0 && tracker.calories_left_policy() == CaloriesLeftPolicy::Signed {
            println!("Left:     over target by {:.0} kcal", -left);
        } else {
            println!("Left:     {:.0} kcal", left);
        }

        println!("\nMacros:");
        for m in tracker.macros_view(date) {
            println!("  {}", m);
        }

        let meals = tracker.meals(date);
        println!("\nMeals: {}", meals.len());

        Ok(())
    }
}
