use std::io::Read;

use hml_parse::{Lexer, Parser};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source).unwrap();

    println!("=== Tokens ===");
    for token in Lexer::new(&source) {
        println!("{:?}", token);
    }

    println!("\n=== Lines ===");
    for line in Parser::new(&source) {
        match line {
            Ok(line) => println!(
                "{:indent$}{} {:?} {:?}",
                "",
                line.name(),
                line.properties,
                line.text,
                indent = line.indent as usize
            ),
            Err(error) => {
                eprint!("{}", error.render("<stdin>", &source));
                std::process::exit(1);
            }
        }
    }
}
