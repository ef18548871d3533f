use anyhow::Result;
use gremlin_client::GremlinClient;
use prettytable::{Cell, Row, Table};
use rustyline::error::ReadlineError;
use rustyline::Editor;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "gremlin-cli")]
struct Opt {
    /// Gremlin server host
    #[structopt(long, default_value = "localhost")]
    host: String,

    /// Gremlin server port
    #[structopt(long, default_value = "8182")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::from_args();
    let client = GremlinClient::connect((opt.host.as_str(), opt.port));

    let mut editor: Editor<()> = Editor::new();
    println!("gremlin-cli connected to {}:{}", opt.host, opt.port);

    loop {
        match editor.readline("gremlin> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line);

                match client.execute(line.to_string()).await {
                    Ok(values) => print_results(&values),
                    Err(err) => eprintln!("error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("readline error: {}", err);
                break;
            }
        }
    }

    Ok(())
}

fn print_results(values: &[gremlin_client::GValue]) {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("result")]));
    for value in values {
        table.add_row(Row::new(vec![Cell::new(&format!("{:?}", value))]));
    }
    table.printstd();
}
