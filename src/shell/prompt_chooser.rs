use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};
use std::pin::pin;
use std::thread;

use futures::future::{Either, select};
use futures_channel::oneshot;
use supports_color::Stream;
use tracing::{info, warn};

use crate::navigation::{Candidate, Chooser};
use crate::search::CancellationToken;
use crate::shell::Presenter;

/// Lists the matches and reads the user's pick as a 1-based number.
///
/// Empty input, end of input or anything that is not one of the listed
/// numbers aborts the choice, and so does tripping the cancellation token
/// while the prompt waits.
pub struct PromptChooser<R, W> {
    input: Option<R>,
    output: W,
    presenter: Presenter,
    cancellation: CancellationToken,
}

impl PromptChooser<BufReader<Stdin>, Stderr> {
    /// Prompts on stderr, coloured when stderr supports it.
    pub fn stdio(cancellation: CancellationToken) -> Self {
        Self::new(
            BufReader::new(io::stdin()),
            io::stderr(),
            Presenter::detect(Stream::Stderr),
        )
        .with_cancellation(cancellation)
    }
}

impl<R: BufRead + Send + 'static, W: Write> PromptChooser<R, W> {
    pub fn new(input: R, output: W, presenter: Presenter) -> Self {
        Self {
            input: Some(input),
            output,
            presenter,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    fn show(&mut self, candidates: &[Candidate]) -> io::Result<()> {
        writeln!(self.output, "Multiple folders found, pick one:")?;
        for (index, candidate) in candidates.iter().enumerate() {
            writeln!(self.output, "{}", self.presenter.candidate(index + 1, candidate))?;
        }
        write!(self.output, "[1-{}] ", candidates.len())?;
        self.output.flush()
    }

    /// Reads one line on a helper thread so the runtime keeps running while
    /// the user types. `None` means the token was tripped first.
    async fn read_answer(&mut self) -> Option<io::Result<String>> {
        // The reader stays with an abandoned helper thread after a cancel.
        let Some(mut input) = self.input.take() else {
            return Some(Ok(String::new()));
        };

        let (sender, receiver) = oneshot::channel();
        thread::spawn(move || {
            let mut answer = String::new();
            let result = input.read_line(&mut answer).map(|_| answer);
            let _ = sender.send((result, input));
        });

        let cancellation = self.cancellation.clone();
        match select(pin!(receiver), pin!(cancellation.cancelled())).await {
            Either::Left((Ok((result, input)), _)) => {
                self.input = Some(input);
                Some(result)
            }
            Either::Left((Err(_), _)) => Some(Err(io::Error::other("prompt reader stopped"))),
            Either::Right(((), _)) => None,
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead + Send + 'static, W: Write> Chooser for PromptChooser<R, W> {
    async fn choose(&mut self, candidates: &[Candidate]) -> Option<usize> {
        if self.cancellation.is_cancelled() {
            info!("Interrupted before choosing");
            return None;
        }
        if let Err(e) = self.show(candidates) {
            warn!("Failed to prompt for a choice: {}", e);
            return None;
        }

        let answer = match self.read_answer().await {
            Some(Ok(answer)) => answer,
            Some(Err(e)) => {
                warn!("Failed to read the choice: {}", e);
                return None;
            }
            None => {
                info!("Interrupted while waiting for a choice");
                return None;
            }
        };

        let answer = answer.trim();
        if answer.is_empty() {
            return None;
        }
        match answer.parse::<usize>() {
            Ok(number) if (1..=candidates.len()).contains(&number) => Some(number - 1),
            _ => {
                warn!("'{}' is not one of the listed choices", answer);
                None
            }
        }
    }
}
