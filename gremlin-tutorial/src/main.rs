use gremlin_client::process::GraphTraversalSource;
use gremlin_client::{GremlinClient, GremlinResult};

#[tokio::main]
async fn main() -> GremlinResult<()> {
    let client = GremlinClient::connect("localhost");
    let g = GraphTraversalSource::new();

    let results = client
        .submit(&g.v(vec![]).has_label(vec!["person".into()]).values(vec!["name".into()]))
        .await?;

    for value in results {
        println!("{:?}", value);
    }

    Ok(())
}
