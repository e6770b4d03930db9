
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let hc = httpc_test::new_client("http://localhost:4000")?;

    let req_register = hc.do_post(
        "/register",
        json!({
            "name": "Ada Lovelace",
            "phone": "555-0100",
            "email": "ada@example.com",
            "company": "Analytical Engines"
        }),
    );
    req_register.await?.print().await?;

    hc.do_get("/search?q=lovelace").await?.print().await?;

    hc.do_post("/checkin", json!({ "phone": "555-0100" }))
        .await?
        .print()
        .await?;

    hc.do_post("/checkin", json!({ "phone": "000-0000" }))
        .await?
        .print()
        .await?;

    Ok(())
}
