use clap::{Args, Subcommand};

use macrolog_core::{Meal, NutritionStore, NutritionTracker};

use super::parse_date;

#[derive(Args)]
pub struct MealCommand {
    #[command(subcommand)]
    pub command: MealSubcommand,
}

/// Nutrition values are always entered per 100g; the actual intake is
/// derived from --grams.
#[derive(Args)]
pub struct MealFields {
    /// Food name
    pub name: String,

    /// kcal per 100g
    #[arg(long)]
    pub calories: f64,

    /// Protein grams per 100g
    #[arg(long, short)]
    pub protein: f64,

    /// Carb grams per 100g
    #[arg(long)]
    pub carbs: f64,

    /// Fat grams per 100g
    #[arg(long, short)]
    pub fat: f64,

    /// Serving size consumed, in grams
    #[arg(long, short)]
    pub grams: f64,

    /// Localized display name
    #[arg(long)]
    pub korean_name: Option<String>,

    /// Reference to a local photo of the food
    #[arg(long)]
    pub image: Option<String>,
}

impl MealFields {
    pub(super) fn to_meal(&self) -> Meal {
        let mut meal = Meal::new(
            &self.name,
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
            self.grams,
        );
        if let Some(korean) = &self.korean_name {
            meal = meal.with_korean_name(korean);
        }
        if let Some(image) = &self.image {
            meal = meal.with_image_uri(image);
        }
        meal
    }
}

#[derive(Subcommand)]
pub enum MealSubcommand {
    /// Record a meal
    Add {
        #[command(flatten)]
        fields: MealFields,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Also add this food to the saved-foods catalog
        #[arg(long)]
        save: bool,
    },

    /// List a day's meals in the order they were added
    List {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// List a day's meals most-recent-first
    Recent {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Replace a recorded meal by its list index
    Edit {
        /// 0-based index as shown by `meal list`
        index: usize,

        #[command(flatten)]
        fields: MealFields,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Delete a recorded meal by its list index
    Delete {
        /// 0-based index as shown by `meal list`
        index: usize,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },
}

impl MealCommand {
    pub async fn run<S: NutritionStore>(
        &self,
        tracker: &mut NutritionTracker<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MealSubcommand::Add { fields, date, save } => {
                let date = parse_date(date)?;
                let meal = fields.to_meal().with_date(date);

                if *save {
                    tracker.save_food(meal.clone()).await;
                    println!("Saved to foods catalog.");
                }
                println!("Added: {}", meal);
                tracker.add_meal(meal).await;

                println!(
                    "Calories left for {}: {:.0} kcal",
                    date,
                    tracker.calories_left(date)
                );
                Ok(())
            }
            MealSubcommand::List { date } => {
                let date = parse_date(date)?;
                print_meals(&tracker.meals(date), date, true)
            }
            MealSubcommand::Recent { date } => {
                // reversed order, so no indices: edit/delete take `meal list` indices
                let date = parse_date(date)?;
                print_meals(&tracker.recent_meals(date), date, false)
            }
            MealSubcommand::Edit {
                index,
                fields,
                date,
            } => {
                let date = parse_date(date)?;
                tracker.update_meal(date, *index, fields.to_meal()).await?;
                println!("Updated meal {} on {}.", index, date);
                Ok(())
            }
            MealSubcommand::Delete { index, date } => {
                let date = parse_date(date)?;
                tracker.delete_meal(date, *index).await?;
                println!("Deleted meal {} on {}.", index, date);
                Ok(())
            }
        }
    }
}

fn print_meals(
    meals: &[Meal],
    date: chrono::NaiveDate,
    indexed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if meals.is_empty() {
        println!("No meals recorded for {}.", date);
        return Ok(());
    }

    println!("{}", date);
    println!("{}", "-".repeat(10));
    for line in meal_lines(meals, indexed) {
        println!("  {}", line);
    }
    println!("\nTotal: {} meal(s)", meals.len());
    Ok(())
}

fn meal_lines(meals: &[Meal], indexed: bool) -> Vec<String> {
    meals
        .iter()
        .enumerate()
        .map(|(i, meal)| {
            if indexed {
                format!("[{}] {}", i, meal)
            } else {
                meal.to_string()
            }
        })
        .collect()
}
