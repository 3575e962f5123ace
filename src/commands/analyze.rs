use std::path::PathBuf;

use clap::Args;

use macrolog_core::{Meal, NutritionStore, NutritionTracker};

use crate::api::ClassifierClient;

use super::parse_date;

#[derive(Args)]
pub struct AnalyzeCommand {
    /// Path to the food photo
    pub image: PathBuf,

    /// Serving size consumed, in grams
    #[arg(long, short, default_value_t = 100.0)]
    pub grams: f64,

    /// Record the analyzed food as a meal
    #[arg(long)]
    pub add: bool,

    /// Add the analyzed food to the saved-foods catalog
    #[arg(long)]
    pub save: bool,

    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    pub date: Option<String>,
}

impl AnalyzeCommand {
    pub async fn run<S: NutritionStore>(
        &self,
        client: &ClassifierClient,
        tracker: &mut NutritionTracker<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let date = parse_date(&self.date)?;

        let analysis = client.analyze_image(&self.image).await?;

        println!("Detected: {}", analysis.food);
        if let Some(korean) = &analysis.food_korean {
            println!("          {}", korean);
        }
        if let Some(confidence) = analysis.confidence {
            println!("Confidence: {:.0}%", confidence * 100.0);
        }
        println!(
            "Per 100g: {:.0} kcal, P {:.1}g / C {:.1}g / F {:.1}g",
            analysis.calories, analysis.protein, analysis.carbs, analysis.fats
        );
        if let Some(message) = &analysis.message {
            println!("Note: {}", message);
        }

        if !self.add && !self.save {
            return Ok(());
        }

        let mut meal = Meal::new(
            &analysis.food,
            analysis.calories,
            analysis.protein,
            analysis.carbs,
            analysis.fats,
            self.grams,
        )
        .with_date(date)
        .with_image_uri(self.image.to_string_lossy());
        if let Some(korean) = &analysis.food_korean {
            meal = meal.with_korean_name(korean);
        }

        if self.save {
            tracker.save_food(meal.clone()).await;
            println!("\nSaved to foods catalog.");
        }
        if self.add {
            println!("\nAdded: {}", meal);
            tracker.add_meal(meal).await;
            println!(
                "Calories left for {}: {:.0} kcal",
                date,
                tracker.calories_left(date)
            );
        }

        Ok(())
    }
}
