use jojo_api_client::rest::JojoRestClientBuilder;

fn live_tests_enabled() -> bool {
    std::env::var("JOJO_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_private_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let builder = match JojoRestClientBuilder::from_env() {
        Ok(builder) => builder,
        Err(_) => return Ok(()),
    };
    let client = builder.build()?;

    let _time = client.get_time().await?;
    let account = client.get_account(None).await?;
    assert!(account.is_object());

    Ok(())
}
