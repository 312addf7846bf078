use fallible_iterator::FallibleIterator;

use sqlite3_splitter::lexer::sql::Splitter;
use sqlite3_splitter::lexer::InputStream;

use std::env;
use std::fs::File;

/// Split specified files into statements and print them.
fn main() {
    env_logger::init();
    for arg in env::args().skip(1) {
        let f = File::open(&arg).unwrap();
        let mut splitter = Splitter::new(InputStream::new(f));
        loop {
            match splitter.next() {
                Ok(None) => break,
                Err(err) => {
                    eprintln!("Err: {} in {}", err, arg);
                    break;
                }
                Ok(Some(stmt)) => {
                    println!("--------------------------------------------------------------------------------");
                    println!("{}", stmt);
                }
            }
        }
    }
}
