use sqlite3_splitter::lexer::sql::Tokenizer;
use sqlite3_splitter::lexer::{ChunkSource, InputStream};

use std::env;
use std::fs::File;

/// Tokenize specified files (and do some checks)
fn main() {
    env_logger::init();
    for arg in env::args().skip(1) {
        let f = File::open(&arg).unwrap();
        let mut input = InputStream::new(f);
        let mut tokenizer = Tokenizer::new();
        loop {
            match input.next_chunk() {
                Ok(Some(chunk)) => {
                    for token in tokenizer.write(&chunk) {
                        println!("{:?}\t{:?}", token.kind, token.raw);
                    }
                }
                Ok(None) => {
                    for token in tokenizer.finalize() {
                        println!("{:?}\t{:?}", token.kind, token.raw);
                    }
                    break;
                }
                Err(err) => {
                    eprintln!("Err: {} in {}", err, arg);
                    break;
                }
            }
        }
    }
}
