mod observation;
pub use observation::*;

use chutes::{Action, Okay, PlayerIdx, Request};

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, player_idx: PlayerIdx);
    fn next_action(&mut self, observation: &str) -> Action;

    /// Called with the result of every action that didn't end the turn.
    fn observe(&mut self, _message: &str) {}

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // EOF, the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { player_idx } => {
                    self.new_game(player_idx);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::NextAction { observation } => serde_json::to_writer(
                    &mut stdout,
                    &self.next_action(&observation).tool_call(),
                )?,
                Request::Observe { message } => {
                    self.observe(&message);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}
