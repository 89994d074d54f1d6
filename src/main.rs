use chrono::{Local, NaiveDate};
use clap::Parser;
use dialoguer::Confirm;
use meal_planner::{cli, config, error, meals, recipes, shopping, store};
use meal_planner_common::calendar::{parse_date, weeks_range};
use meal_planner_common::{display_quantity, filter_recipes, NewRecipe, RecipeFilter};
use cli::{Cli, Commands, IngredientCommand, PlanCommand, RecipeCommand, ShopCommand};
use config::Config;
use error::{MealPlannerError, Result};
use store::{BackingStore, JsonStore};
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn week_start_date(week: Option<&str>) -> Result<NaiveDate> {
    match week {
        Some(text) => Ok(parse_date(text)?),
        None => Ok(Local::now().date_naive()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;

    if let Commands::Config { set_data_path, set_weeks, show } = cli.command {
        if let Some(path) = set_data_path {
            config.set_data_path(path)?;
            println!("✔ ストアファイルを設定しました");
        }
        if let Some(weeks) = set_weeks {
            config.set_weeks_ahead(weeks)?;
            println!("✔ 既定の週数を設定しました");
        }
        if show {
            println!("設定:");
            println!("  設定ファイル: {}", Config::config_path()?.display());
            println!("  ストアファイル: {}", config.data_file()?.display());
            println!("  既定の週数: {}", config.weeks_ahead);
        }
        return Ok(());
    }

    let data_path = match cli.data {
        Some(path) => path,
        None => config.data_file()?,
    };
    let store = JsonStore::open(&data_path).await?;

    match cli.command {
        Commands::Ingredient(IngredientCommand::Add { name }) => {
            let ingredient = store.create_ingredient(&name).await?;
            println!("✔ 材料を登録しました: #{} {}", ingredient.id, ingredient.name);
        }

        Commands::Ingredient(IngredientCommand::List) => {
            let ingredients = store.list_ingredients().await?;
            if ingredients.is_empty() {
                println!("材料が登録されていません");
            }
            for ingredient in ingredients {
                println!("#{:<4} {}", ingredient.id, ingredient.name);
            }
        }

        Commands::Recipe(RecipeCommand::Add { name, ingredients, tags, seasons, cuisine, base, difficulty }) => {
            let new_recipe = NewRecipe {
                name,
                tags,
                seasons,
                cuisine,
                base,
                difficulty,
                ..Default::default()
            };
            let recipe = recipes::create_recipe(&store, new_recipe, &ingredients).await?;
            println!("✔ レシピを登録しました: #{} {} (材料{}件)", recipe.id, recipe.name, recipe.ingredients.len());
        }

        Commands::Recipe(RecipeCommand::List { search, seasons, bases, cuisines, tags, difficulties }) => {
            let all = store.list_recipes().await?;
            let filter = RecipeFilter {
                search: search.unwrap_or_default(),
                seasons,
                bases,
                cuisines,
                tags,
                difficulties,
            };
            let matched = filter_recipes(&all, &filter);

            println!("{}件のレシピ{}", matched.len(), if filter.is_active() { "（絞り込み中）" } else { "" });
            for recipe in matched {
                let seasons: Vec<&str> = recipe.seasons.iter().map(|s| s.as_str()).collect();
                println!(
                    "#{:<4} {}  [{}] {} {}",
                    recipe.id,
                    recipe.name,
                    recipe.difficulty.as_str(),
                    seasons.join(","),
                    recipe.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" "),
                );
            }
        }

        Commands::Recipe(RecipeCommand::Show { id }) => {
            let recipe = store
                .get_recipe_with_ingredients(id)
                .await?
                .ok_or_else(|| MealPlannerError::NotFound(format!("レシピ #{}", id)))?;
            let ingredients = store.list_ingredients().await?;

            println!("📖 {} (#{})", recipe.name, recipe.id);
            if let Some(cuisine) = &recipe.cuisine {
                println!("  料理ジャンル: {}", cuisine);
            }
            if let Some(base) = &recipe.base {
                println!("  ベース: {}", base);
            }
            println!("  難易度: {}", recipe.difficulty.as_str());
            println!("  材料:");
            for line in &recipe.ingredients {
                let name = line
                    .ingredient_id
                    .and_then(|id| ingredients.iter().find(|i| i.id == id))
                    .map(|i| i.name.as_str())
                    .unwrap_or("?");
                match display_quantity(line.quantity.as_deref(), line.unit.as_deref()) {
                    Some(qty) => println!("    - {}  {}", name, qty),
                    None => println!("    - {}", name),
                }
            }
        }

        Commands::Recipe(RecipeCommand::Remove { id }) => {
            store.delete_recipe(id).await?;
            println!("✔ レシピ #{} を削除しました", id);
        }

        Commands::Plan(PlanCommand::Add { recipe_id, date, meal_type }) => {
            let date = parse_date(&date)?;
            let plan = store.create_meal_plan(recipe_id, date, meal_type).await?;
            println!("✔ 献立を追加しました: #{} {} ({})", plan.id, plan.planned_date, plan.meal_type);
        }

        Commands::Plan(PlanCommand::List { week, weeks }) => {
            let (start, end) = weeks_range(week_start_date(week.as_deref())?, weeks);
            println!("📅 {} 〜 {}\n", start, end);

            for day in meals::overview(&store, start, end).await? {
                if day.meals.is_empty() {
                    println!("{} ({})  献立なし", day.date, day.date.format("%a"));
                    continue;
                }
                println!("{} ({})  材料{}件", day.date, day.date.format("%a"), day.ingredient_count());
                for (plan, recipe) in &day.meals {
                    let name = recipe.as_ref().map(|r| r.name.as_str()).unwrap_or("?");
                    println!("    #{:<4} {} [{}]", plan.id, name, plan.meal_type);
                }
            }
        }

        Commands::Plan(PlanCommand::Remove { id }) => {
            store.delete_meal_plan(id).await?;
            println!("✔ 献立 #{} を削除しました", id);
        }

        Commands::Shop(ShopCommand::Generate { week, weeks, days }) => {
            println!("🛒 meal-planner - 買い物リスト生成\n");

            let selected = if days.is_empty() {
                let weeks = weeks.unwrap_or(config.weeks_ahead);
                let (start, end) = weeks_range(week_start_date(week.as_deref())?, weeks);
                println!("[1/2] {} 〜 {} の献立を選択中...", start, end);
                meals::dates_with_meals(&store, start, end).await?
            } else {
                println!("[1/2] 指定日の献立を選択中...");
                days.iter().map(|d| parse_date(d)).collect::<meal_planner_common::Result<Vec<_>>>()?
            };
            let meal_count = meals::count_selected(&store, &selected).await?;
            println!("✔ {}日・{}件の献立を選択\n", selected.len(), meal_count);

            println!("[2/2] 材料を集計中...");
            match shopping::generate_shopping_list(&store, &selected).await {
                Ok(report) => {
                    println!("✔ {}件の献立から{}件の材料を追加しました", report.meals, report.processed);
                    println!("  新規: {}  合算: {}", report.created, report.merged);
                    println!("\n✅ 完了");
                }
                Err(MealPlannerError::NoIngredientsFound) => {
                    println!("選択した献立に材料が見つかりません。買い物リストは変更していません");
                }
                Err(e) => return Err(e),
            }
        }

        Commands::Shop(ShopCommand::List) => {
            let items = store.list_shopping_items().await?;
            if items.is_empty() {
                println!("🛒 買い物リストは空です");
                return Ok(());
            }

            let ingredients = store.list_ingredients().await?;
            let unchecked = items.iter().filter(|i| !i.checked).count();
            println!("{}件残り • {}件チェック済み\n", unchecked, items.len() - unchecked);

            for item in items.iter().filter(|i| !i.checked) {
                println!("[ ] #{:<4} {}", item.id, shopping::item_label(item, &ingredients));
            }
            if unchecked < items.len() {
                println!("\n✓ カゴの中");
                for item in items.iter().filter(|i| i.checked) {
                    println!("[x] #{:<4} {}", item.id, shopping::item_label(item, &ingredients));
                }
            }
        }

        Commands::Shop(ShopCommand::Add { name, custom }) => {
            let ingredient = if custom {
                None
            } else {
                store.find_ingredient_by_name(&name).await?
            };

            match ingredient {
                Some(ingredient) => match shopping::add_ingredient(&store, ingredient.id).await? {
                    shopping::AddOutcome::Created(item) => println!("✔ 追加しました: #{} {}", item.id, ingredient.name),
                    shopping::AddOutcome::Incremented(_) => println!("✔ {} +1", ingredient.name),
                },
                None => {
                    let item = shopping::add_custom(&store, &name).await?;
                    println!("✔ 追加しました: #{} {}", item.id, name.trim());
                }
            }
        }

        Commands::Shop(ShopCommand::Toggle { id }) => {
            let item = shopping::toggle(&store, id).await?;
            println!("✔ #{} を{}", id, if item.checked { "チェックしました" } else { "未チェックに戻しました" });
        }

        Commands::Shop(ShopCommand::Inc { id }) => {
            let item = shopping::increment(&store, id).await?;
            let qty = display_quantity(item.quantity.as_deref(), item.unit.as_deref()).unwrap_or_default();
            println!("✔ #{} {}", id, qty);
        }

        Commands::Shop(ShopCommand::Dec { id }) => {
            let item = shopping::decrement(&store, id).await?;
            let qty = display_quantity(item.quantity.as_deref(), item.unit.as_deref()).unwrap_or_else(|| "数量なし".into());
            println!("✔ #{} {}", id, qty);
        }

        Commands::Shop(ShopCommand::Remove { id }) => {
            shopping::remove(&store, id).await?;
            println!("✔ #{} を削除しました", id);
        }

        Commands::Shop(ShopCommand::Clear { all, yes }) => {
            if all {
                let confirmed = yes
                    || Confirm::new()
                        .with_prompt("買い物リストをすべて削除しますか？")
                        .default(false)
                        .interact()
                        .map_err(|e| MealPlannerError::InvalidInput(e.to_string()))?;
                if !confirmed {
                    println!("キャンセルしました");
                    return Ok(());
                }
                let removed = shopping::clear_all(&store).await?;
                println!("✔ {}件削除しました", removed);
            } else {
                let removed = shopping::clear_checked(&store).await?;
                println!("✔ チェック済み{}件を削除しました", removed);
            }
        }

        Commands::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}
