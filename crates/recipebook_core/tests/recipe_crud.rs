use recipebook_core::db::open_db_in_memory;
use recipebook_core::{
    Difficulty, RecipeDraft, RecipeId, RecipeListQuery, RecipeRepository, RecipeService,
    RecipeServiceError, RecipeValidationError, RepoError, SqliteRecipeRepository,
};
use rusqlite::{params, Connection};

#[test]
fn create_and_get_recipe_assigns_difficulty_and_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecipeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_recipe(&RecipeDraft::new(
            "  Pasta Carbonara ",
            "pasta, eggs, pecorino, guanciale",
            20,
            "Classic Roman dish.",
        ))
        .unwrap();

    let loaded = repo.get_recipe(id).unwrap().expect("recipe should exist");
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Pasta Carbonara");
    assert_eq!(loaded.cooking_time, 20);
    assert_eq!(loaded.difficulty, Difficulty::Intermediate);
    assert_eq!(loaded.description, "Classic Roman dish.");
    assert!(loaded.created_at > 0);
    assert_eq!(loaded.created_at, loaded.updated_at);
}

#[test]
fn update_recomputes_difficulty_from_new_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecipeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_recipe(&RecipeDraft::new("Toast", "bread, butter", 4, ""))
        .unwrap();
    assert_eq!(
        repo.get_recipe(id).unwrap().unwrap().difficulty,
        Difficulty::Easy
    );

    repo.update_recipe(
        id,
        &RecipeDraft::new("Toast Deluxe", "bread, butter, jam, honey", 4, "Sweet."),
    )
    .unwrap();
    let updated = repo.get_recipe(id).unwrap().unwrap();
    assert_eq!(updated.name, "Toast Deluxe");
    assert_eq!(updated.difficulty, Difficulty::Medium);
    assert!(updated.updated_at >= updated.created_at);

    repo.update_recipe(id, &RecipeDraft::new("Slow Toast", "bread", 90, ""))
        .unwrap();
    assert_eq!(
        repo.get_recipe(id).unwrap().unwrap().difficulty,
        Difficulty::Hard
    );
}

#[test]
fn invalid_names_are_rejected_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecipeRepository::try_new(&conn).unwrap();

    let blank = repo
        .create_recipe(&RecipeDraft::new("   ", "salt", 1, ""))
        .unwrap_err();
    assert!(matches!(
        blank,
        RepoError::Validation(RecipeValidationError::EmptyName)
    ));

    let long = repo
        .create_recipe(&RecipeDraft::new("x".repeat(201), "salt", 1, ""))
        .unwrap_err();
    assert!(matches!(
        long,
        RepoError::Validation(RecipeValidationError::NameTooLong { .. })
    ));

    assert!(repo
        .list_recipes(&RecipeListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn out_of_band_edit_keeps_stored_difficulty_until_next_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecipeRepository::try_new(&conn).unwrap();

    let draft = RecipeDraft::new("Toast", "bread, butter", 4, "");
    let id = repo.create_recipe(&draft).unwrap();
    conn.execute(
        "UPDATE recipes SET cooking_time = 90 WHERE id = ?1;",
        params![id.to_string()],
    )
    .unwrap();

    let stale = repo.get_recipe(id).unwrap().expect("row still loads");
    assert_eq!(stale.cooking_time, 90);
    assert_eq!(stale.difficulty, Difficulty::Easy);
    assert_eq!(stale.expected_difficulty(), Difficulty::Hard);

    repo.update_recipe(id, &RecipeDraft::new("Toast", "bread, butter", 90, ""))
        .unwrap();
    assert_eq!(
        repo.get_recipe(id).unwrap().unwrap().difficulty,
        Difficulty::Hard
    );
}

#[test]
fn update_and_delete_missing_recipe_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecipeRepository::try_new(&conn).unwrap();
    let missing = RecipeId::new_v4();

    let update_err = repo
        .update_recipe(missing, &RecipeDraft::new("Ghost", "", 1, ""))
        .unwrap_err();
    assert!(matches!(update_err, RepoError::NotFound(id) if id == missing));

    let delete_err = repo.delete_recipe(missing).unwrap_err();
    assert!(matches!(delete_err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn delete_removes_recipe_permanently() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecipeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_recipe(&RecipeDraft::new("Soup", "water, salt", 30, ""))
        .unwrap();
    repo.delete_recipe(id).unwrap();

    assert!(repo.get_recipe(id).unwrap().is_none());
    assert!(matches!(
        repo.delete_recipe(id).unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn list_orders_newest_first_and_paginates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecipeRepository::try_new(&conn).unwrap();

    let oldest = repo
        .create_recipe(&RecipeDraft::new("Oldest", "a", 5, ""))
        .unwrap();
    let newest = repo
        .create_recipe(&RecipeDraft::new("Newest", "a", 5, ""))
        .unwrap();
    let middle = repo
        .create_recipe(&RecipeDraft::new("Middle", "a", 5, ""))
        .unwrap();
    set_created_at(&conn, oldest, 1_000);
    set_created_at(&conn, middle, 2_000);
    set_created_at(&conn, newest, 3_000);

    let all = repo.list_recipes(&RecipeListQuery::default()).unwrap();
    let names: Vec<_> = all.iter().map(|recipe| recipe.name.as_str()).collect();
    assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);

    let page = repo
        .list_recipes(&RecipeListQuery {
            limit: Some(1),
            offset: 1,
        })
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, middle);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let result = SqliteRecipeRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        })
    ));
}

#[test]
fn service_returns_read_back_records_and_detail() {
    let conn = open_db_in_memory().unwrap();
    let service = RecipeService::new(SqliteRecipeRepository::try_new(&conn).unwrap());

    let created = service
        .create_recipe(&RecipeDraft::new(
            "Quick Salad",
            "lettuce, , tomato ",
            5,
            "",
        ))
        .unwrap();
    assert_eq!(created.difficulty, Difficulty::Easy);

    let detail = service.recipe_detail(created.id).unwrap();
    assert_eq!(detail.recipe, created);
    assert_eq!(detail.ingredients, vec!["lettuce", "tomato"]);

    let updated = service
        .update_recipe(
            created.id,
            &RecipeDraft::new("Big Salad", "lettuce, tomato, cucumber, feta", 12, ""),
        )
        .unwrap();
    assert_eq!(updated.difficulty, Difficulty::Intermediate);

    service.delete_recipe(created.id).unwrap();
    assert!(matches!(
        service.recipe_detail(created.id).unwrap_err(),
        RecipeServiceError::RecipeNotFound(id) if id == created.id
    ));
}

fn set_created_at(conn: &Connection, id: RecipeId, created_at: i64) {
    conn.execute(
        "UPDATE recipes SET created_at = ?1, updated_at = ?1 WHERE id = ?2;",
        params![created_at, id.to_string()],
    )
    .unwrap();
}
