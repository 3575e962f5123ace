use clap::{Args, Subcommand};

use macrolog_core::{NutritionStore, NutritionTracker};

use crate::api::ClassifierClient;

use super::meal::MealFields;
use super::parse_date;

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// Add a food to the saved-foods catalog for reuse
    Save {
        #[command(flatten)]
        fields: MealFields,
    },

    /// List saved foods
    List,

    /// Record a saved food as a meal
    Log {
        /// 0-based index as shown by `food list`
        index: usize,

        /// Serving size override in grams
        #[arg(long, short)]
        grams: Option<f64>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Delete a saved food by its list index
    Delete {
        /// 0-based index as shown by `food list`
        index: usize,
    },

    /// Look up a food's per-100g nutrition from the classification service
    Info {
        /// Food name as the service knows it
        name: String,
    },
}

impl FoodCommand {
    pub async fn run<S: NutritionStore>(
        &self,
        client: &ClassifierClient,
        tracker: &mut NutritionTracker<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FoodSubcommand::Save { fields } => {
                let food = fields.to_meal();
                println!("Saved: {}", food);
                tracker.save_food(food).await;
                Ok(())
            }
            FoodSubcommand::List => {
                let foods = tracker.saved_foods();
                if foods.is_empty() {
                    println!("No saved foods.");
                    return Ok(());
                }
                for (i, food) in foods.iter().enumerate() {
                    println!("  [{}] {}", i, food);
                }
                println!("\nTotal: {} food(s)", foods.len());
                Ok(())
            }
            FoodSubcommand::Log { index, grams, date } => {
                let date = parse_date(date)?;
                let foods = tracker.saved_foods();
                let template = foods.get(*index).ok_or_else(|| {
                    format!("No saved food at index {}. See `food list`.", index)
                })?;

                // fresh record: the logged meal gets its own identity
                let mut meal = macrolog_core::Meal::new(
                    &template.name,
                    template.calories,
                    template.protein,
                    template.carbs,
                    template.fat,
                    grams.unwrap_or(template.grams),
                )
                .with_date(date);
                meal.korean_name = template.korean_name.clone();
                meal.image_uri = template.image_uri.clone();

                println!("Added: {}", meal);
                tracker.add_meal(meal).await;
                println!(
                    "Calories left for {}: {:.0} kcal",
                    date,
                    tracker.calories_left(date)
                );
                Ok(())
            }
            FoodSubcommand::Delete { index } => {
                tracker.delete_saved_food(*index).await?;
                println!("Deleted saved food {}.", index);
                Ok(())
            }
            FoodSubcommand::Info { name } => {
                let info = client.food_info(name).await?;
                println!("{} (per 100g)", name);
                println!("  Calories: {:.0} kcal", info.calories);
                println!("  Protein:  {:.1}g", info.protein);
                println!("  Carbs:    {:.1}g", info.carbs);
                println!("  Fat:      {:.1}g", info.fats);
                Ok(())
            }
        }
    }
}
