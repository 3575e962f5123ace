use clap::{Args, Subcommand, ValueEnum};

use macrolog_core::{
    CaloriesLeftPolicy, Macro, MacroSet, Nutrient, NutritionStore, NutritionTracker,
};

#[derive(Clone, Copy, ValueEnum)]
pub enum LeftStyle {
    /// Calories left never drops below zero
    Clamp,
    /// Report over-target days as a negative figure
    Signed,
}

impl From<LeftStyle> for CaloriesLeftPolicy {
    fn from(style: LeftStyle) -> Self {
        match style {
            LeftStyle::Clamp => CaloriesLeftPolicy::Clamp,
            LeftStyle::Signed => CaloriesLeftPolicy::Signed,
        }
    }
}

#[derive(Args)]
pub struct GoalsCommand {
    #[command(subcommand)]
    pub command: GoalsSubcommand,
}

#[derive(Subcommand)]
pub enum GoalsSubcommand {
    /// Show the calorie goal and macro targets
    Show,

    /// Replace the calorie goal and macro targets
    Set {
        /// Daily calorie goal (kcal)
        calories: f64,

        /// Protein goal in grams (derived from calories when omitted)
        #[arg(long, short)]
        protein: Option<f64>,

        /// Carb goal in grams (derived from calories when omitted)
        #[arg(long)]
        carbs: Option<f64>,

        /// Fat goal in grams (derived from calories when omitted)
        #[arg(long, short)]
        fat: Option<f64>,

        /// How calories-left reports an over-target day
        #[arg(long, value_enum)]
        left_style: Option<LeftStyle>,
    },
}

impl GoalsCommand {
    pub async fn run<S: NutritionStore>(
        &self,
        tracker: &mut NutritionTracker<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            GoalsSubcommand::Show => {
                println!("Daily goal: {:.0} kcal", tracker.total_calories());
                println!();
                for m in tracker.macros().ordered() {
                    println!("  {}: {:.0} {}", m.kind, m.total, m.unit);
                }
                Ok(())
            }
            GoalsSubcommand::Set {
                calories,
                protein,
                carbs,
                fat,
                left_style,
            } => {
                // 50/30/20 defaults, overridden per nutrient when given
                let derived = MacroSet::for_calories(*calories);
                let goal = |kind: Nutrient, given: &Option<f64>| {
                    Macro::new(kind, 0.0, given.unwrap_or(derived.get(kind).total))
                };
                let macros = MacroSet::new(
                    goal(Nutrient::Protein, protein),
                    goal(Nutrient::Carbs, carbs),
                    goal(Nutrient::Fat, fat),
                );

                tracker.update_settings(*calories, macros).await;
                if let Some(style) = left_style {
                    tracker.set_calories_left_policy((*style).into()).await;
                }

                println!("Goals updated: {:.0} kcal", tracker.total_calories());
                for m in tracker.macros().ordered() {
                    println!("  {}: {:.0} {}", m.kind, m.total, m.unit);
                }
                Ok(())
            }
        }
    }
}
