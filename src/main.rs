use clap::{Parser, Subcommand};
use cooksmart::{
    AppConfig, CookError, CookSmart, FailurePolicy, ScoredRecipe, SearchError, SearchOutcome,
};
use log::error;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "cooksmart")]
#[command(about = "Find recipes by the ingredients you have", long_about = None)]
struct Cli {
    /// Keep results from ingredients whose lookup succeeded when others fail
    #[arg(long, global = true)]
    partial: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search recipes by comma-separated ingredients
    Search {
        /// Ingredients, e.g. "chicken, rice"
        ingredients: String,
    },

    /// List recipes in a category
    Category {
        /// Category name, e.g. "Seafood"
        name: String,
    },

    /// List available categories
    Categories,

    /// Show a recipe with its ingredients
    Show {
        /// Recipe ID
        id: String,
    },

    /// Print a recipe's instructions as numbered cooking steps
    Cook {
        /// Recipe ID
        id: String,
    },

    /// Manage favorite recipes
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },

    /// Manage the shopping list
    Shopping {
        #[command(subcommand)]
        action: ShoppingAction,
    },
}

#[derive(Subcommand, Debug)]
enum FavoriteAction {
    Add { id: String },
    Remove { id: String },
    Toggle { id: String },
    List,
}

#[derive(Subcommand, Debug)]
enum ShoppingAction {
    /// Add every ingredient of a recipe
    Add { recipe_id: String },
    /// Check or uncheck an item
    Toggle { item_id: String },
    Remove { item_id: String },
    List,
    Clear,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            if let Some(search_error) = e.downcast_ref::<SearchError>() {
                eprintln!("{}", search_error.user_message());
            } else if let Some(cook_error) = e.downcast_ref::<CookError>() {
                eprintln!("{}", cook_error.user_message());
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load()?;
    if cli.partial {
        config.search.failure_policy = FailurePolicy::Partial;
    }
    let finder = CookSmart::from_config(&config)?;

    match cli.command {
        Commands::Search { ingredients } => {
            let outcome = finder.search_by_ingredients(&ingredients).await?;
            print_outcome(
                &outcome,
                "No recipes found for the given ingredient(s). Try a different ingredient!",
            );
        }
        Commands::Category { name } => {
            let outcome = finder.search_by_category(&name).await?;
            print_outcome(&outcome, "No recipes found in this category.");
        }
        Commands::Categories => {
            for category in finder.categories().await {
                println!("{}", category.name);
            }
        }
        Commands::Show { id } => {
            let recipe = finder.recipe_details(&id).await?;
            println!("{} ({})", recipe.name, recipe.id);
            let origin: Vec<&str> = [recipe.category.as_deref(), recipe.area.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            if !origin.is_empty() {
                println!("{}", origin.join(" / "));
            }
            let tags = recipe.tags();
            if !tags.is_empty() {
                println!("Tags: {}", tags.join(", "));
            }
            println!("\nIngredients:");
            for ingredient in recipe.ingredients() {
                println!("  - {} {}", ingredient.measure, ingredient.name);
            }
            println!("\n{}", recipe.instructions());
            if let Some(video) = recipe.youtube.as_deref().filter(|v| !v.is_empty()) {
                println!("\nVideo: {}", video);
            }
        }
        Commands::Cook { id } => {
            let mode = finder.start_cooking(&id).await?;
            println!("{} steps\n", mode.steps().len());
            for step in mode.steps() {
                println!("{:>3}. {}", step.step, step.instruction);
            }
        }
        Commands::Favorite { action } => {
            let mut favorites = finder.favorites();
            match action {
                FavoriteAction::Add { id } => favorites.add(&id)?,
                FavoriteAction::Remove { id } => favorites.remove(&id)?,
                FavoriteAction::Toggle { id } => {
                    let now = favorites.toggle(&id)?;
                    println!("{} {}", id, if now { "added" } else { "removed" });
                }
                FavoriteAction::List => {
                    for id in favorites.list() {
                        println!("{}", id);
                    }
                }
            }
        }
        Commands::Shopping { action } => {
            let mut list = finder.shopping_list();
            match action {
                ShoppingAction::Add { recipe_id } => {
                    let recipe = finder.recipe_details(&recipe_id).await?;
                    let ingredients = recipe.ingredients();
                    for ingredient in &ingredients {
                        list.add(
                            &ingredient.name,
                            &ingredient.measure,
                            &recipe.id,
                            &recipe.name,
                        )?;
                    }
                    println!("Added {} item(s) from {}", ingredients.len(), recipe.name);
                }
                ShoppingAction::Toggle { item_id } => match list.toggle(&item_id)? {
                    Some(true) => println!("Checked {}", item_id),
                    Some(false) => println!("Unchecked {}", item_id),
                    None => println!("No item {}", item_id),
                },
                ShoppingAction::Remove { item_id } => list.remove(&item_id)?,
                ShoppingAction::List => {
                    for item in list.items() {
                        let mark = if item.completed { "x" } else { " " };
                        println!(
                            "[{}] {} {} ({}) id={}",
                            mark, item.measure, item.ingredient, item.recipe_name, item.id
                        );
                    }
                    println!("{} item(s) left to buy", list.pending_count());
                }
                ShoppingAction::Clear => list.clear()?,
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &SearchOutcome, empty_message: &str) {
    match outcome {
        SearchOutcome::NoResults => println!("{}", empty_message),
        SearchOutcome::Found(recipes) => {
            for ScoredRecipe {
                recipe,
                match_count,
            } in recipes
            {
                println!("{:>2}  {:<8} {}", match_count, recipe.id, recipe.name);
            }
        }
    }
}
