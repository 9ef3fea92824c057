use cooksmart::{CookSmart, FailurePolicy, SearchError, SearchOutcome};
use mockito::{Matcher, Mock, Server, ServerGuard};

fn meals_json(ids: &[(&str, &str)]) -> String {
    let meals: Vec<String> = ids
        .iter()
        .map(|(id, name)| {
            format!(
                r#"{{"strMeal": "{}", "strMealThumb": "https://www.themealdb.com/images/media/meals/{}.jpg", "idMeal": "{}"}}"#,
                name, id, id
            )
        })
        .collect();
    format!(r#"{{"meals": [{}]}}"#, meals.join(","))
}

async fn mock_ingredient(server: &mut ServerGuard, term: &str, body: String) -> Mock {
    server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("i".into(), term.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

fn finder(server: &ServerGuard, policy: FailurePolicy) -> CookSmart {
    CookSmart::builder()
        .base_url(server.url())
        .failure_policy(policy)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_chicken_and_rice_ranking() {
    let mut server = Server::new_async().await;
    let chicken = mock_ingredient(
        &mut server,
        "chicken",
        meals_json(&[("A", "Chicken Handi"), ("B", "Chicken Fried Rice")]),
    )
    .await;
    let rice = mock_ingredient(
        &mut server,
        "rice",
        meals_json(&[("B", "Chicken Fried Rice"), ("C", "Kedgeree")]),
    )
    .await;

    let outcome = finder(&server, FailurePolicy::FailFast)
        .search_by_ingredients("chicken, rice")
        .await
        .unwrap();

    let ranked: Vec<(&str, usize)> = outcome
        .recipes()
        .iter()
        .map(|r| (r.recipe.id.as_str(), r.match_count))
        .collect();
    assert_eq!(ranked, vec![("B", 2), ("A", 1), ("C", 1)]);

    chicken.assert_async().await;
    rice.assert_async().await;
}

#[tokio::test]
async fn test_terms_are_trimmed_before_lookup() {
    let mut server = Server::new_async().await;
    let garlic =
        mock_ingredient(&mut server, "garlic", meals_json(&[("G", "Garlic Bread")])).await;

    let outcome = finder(&server, FailurePolicy::FailFast)
        .search_by_ingredients("   garlic  ,, ")
        .await
        .unwrap();

    assert_eq!(outcome.recipes().len(), 1);
    assert_eq!(outcome.recipes()[0].recipe.name, "Garlic Bread");
    garlic.assert_async().await;
}

#[tokio::test]
async fn test_no_matches_is_no_results() {
    let mut server = Server::new_async().await;
    let _m = mock_ingredient(&mut server, "durian", r#"{"meals": null}"#.to_string()).await;

    let outcome = finder(&server, FailurePolicy::FailFast)
        .search_by_ingredients("durian")
        .await
        .unwrap();

    assert_eq!(outcome, SearchOutcome::NoResults);
}

#[tokio::test]
async fn test_server_error_fails_whole_search() {
    let mut server = Server::new_async().await;
    let _chicken =
        mock_ingredient(&mut server, "chicken", meals_json(&[("A", "Chicken Handi")])).await;
    let _rice = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("i".into(), "rice".into()))
        .with_status(503)
        .create_async()
        .await;

    let result = finder(&server, FailurePolicy::FailFast)
        .search_by_ingredients("chicken, rice")
        .await;

    match result {
        Err(e @ SearchError::Status { status: 503, .. }) => {
            assert_eq!(e.user_message(), "Failed to search recipes. Please try again.");
        }
        other => panic!("Expected a 503 status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_fails_whole_search() {
    let mut server = Server::new_async().await;
    let _chicken =
        mock_ingredient(&mut server, "chicken", meals_json(&[("A", "Chicken Handi")])).await;
    let _rice = mock_ingredient(&mut server, "rice", "not json at all".to_string()).await;

    let result = finder(&server, FailurePolicy::FailFast)
        .search_by_ingredients("chicken, rice")
        .await;

    assert!(matches!(result, Err(SearchError::Parse(_))));
}

#[tokio::test]
async fn test_partial_policy_keeps_successful_terms() {
    let mut server = Server::new_async().await;
    let _chicken = mock_ingredient(
        &mut server,
        "chicken",
        meals_json(&[("A", "Chicken Handi"), ("B", "Chicken Fried Rice")]),
    )
    .await;
    let _rice = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("i".into(), "rice".into()))
        .with_status(500)
        .create_async()
        .await;

    let outcome = finder(&server, FailurePolicy::Partial)
        .search_by_ingredients("chicken, rice")
        .await
        .unwrap();

    let ids: Vec<&str> = outcome
        .recipes()
        .iter()
        .map(|r| r.recipe.id.as_str())
        .collect();
    assert_eq!(ids, vec!["A", "B"]);
    assert!(outcome.recipes().iter().all(|r| r.match_count == 1));
}
