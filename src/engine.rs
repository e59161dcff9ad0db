/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender},
    thread,
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};

use crate::{
    print_perft, run_series, Cli, ClickOutcome, Color, EngineCommand, Layout, MoveOutcome,
    RandomPlayer, Session, Square, TurnController, DEFAULT_DELAY_MS,
};

/// The interactive checkers engine.
///
/// The engine is the only thing that touches its [`Session`]. Commands arrive over a channel, either from
/// [`Engine::send_command`] or from a thread reading `stdin`, and are handled one at a time on the thread that called [`Engine::run`].
#[derive(Debug)]
pub struct Engine {
    /// The game being played.
    session: Session,

    /// The layout that `reset` returns to when not given a new one.
    layout: Layout,

    /// How long to wait for a command before playing a computer move.
    delay: Duration,

    /// Seed for the automated player, reused for `series` when it isn't given its own.
    seed: Option<u64>,

    /// Whether the result of the current game has already been printed.
    announced: bool,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,
}

impl Engine {
    /// Constructs a new [`Engine`] on the standard layout with two human players, to be executed with [`Engine::run`].
    pub fn new() -> Self {
        let layout = Layout::standard();
        let session = Session::new(&layout);

        Self::with_session(session, layout, Duration::from_millis(DEFAULT_DELAY_MS), None)
    }

    /// Constructs a new [`Engine`] configured by the provided startup options.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let layout = cli
            .starting_layout()
            .context("Failed to load starting layout")?;

        let player = match cli.seed {
            Some(seed) => RandomPlayer::seeded(seed),
            None => RandomPlayer::new(),
        };

        let session = Session::new(&layout)
            .with_controllers(cli.red, cli.white)
            .with_player(player);

        Ok(Self::with_session(session, layout, cli.delay(), cli.seed))
    }

    fn with_session(session: Session, layout: Layout, delay: Duration, seed: Option<u64>) -> Self {
        let (sender, receiver) = channel();

        Self {
            session,
            layout,
            delay,
            seed,
            announced: false,
            sender,
            receiver,
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// The game being played.
    #[inline(always)]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Sends an [`EngineCommand`] to the engine to be executed.
    pub fn send_command(&self, command: EngineCommand) -> Result<()> {
        self.sender
            .send(command)
            .context("Failed to send command to engine")
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    /// Whenever a computer-controlled side is to move, the engine waits up to its delay for a command.
    /// A command that arrives in time is handled first, so a `reset` or `players` cancels the pending move.
    /// Otherwise, the computer plays one move and the loop repeats.
    pub fn run(&mut self) -> Result<()> {
        info!("{} started", self.name());

        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                debug!("Input handler thread stopping: {err}");
            }
        });

        self.event_loop();

        Ok(())
    }

    /// Handles received commands, and plays computer moves whenever a delay passes without one, until told to exit.
    fn event_loop(&mut self) {
        loop {
            self.announce_result();

            let cmd = if self.session.is_computer_to_move() && !self.session.is_terminal() {
                match self.receiver.recv_timeout(self.delay) {
                    Ok(cmd) => cmd,
                    Err(RecvTimeoutError::Timeout) => {
                        self.play_automated_move();
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            } else {
                match self.receiver.recv() {
                    Ok(cmd) => cmd,
                    Err(_) => break,
                }
            };

            if matches!(cmd, EngineCommand::Exit) {
                break;
            }

            // Keep running, even on error
            if let Err(e) = self.handle_command(cmd) {
                eprintln!("Error: {e}");
            }
        }
    }

    /// Handle the execution of a single [`EngineCommand`].
    fn handle_command(&mut self, cmd: EngineCommand) -> Result<()> {
        match cmd {
            EngineCommand::Auto => self.auto()?,

            EngineCommand::Click { square } => self.click(square)?,

            EngineCommand::Display => println!("{}", self.session),

            EngineCommand::Layout => print!("{}", self.session.board().to_layout()),

            EngineCommand::Moves { square, sort } => self.moves(square, sort),

            EngineCommand::Perft { depth } => {
                print_perft::<false>(self.session.board(), &self.turn(), depth);
            }

            EngineCommand::Play { from, to } => {
                let outcome = self.session.apply_selection(from, to)?;
                self.report(&outcome);
            }

            EngineCommand::Players { red, white } => {
                self.session.set_controller(Color::Red, red);
                self.session.set_controller(Color::White, white);
                println!("red: {red}, white: {white}");
            }

            EngineCommand::Reset { preset, layout } => {
                if let Some(layout) = EngineCommand::reset_layout(preset.as_deref(), &layout)? {
                    self.layout = layout;
                }
                self.new_game();
            }

            EngineCommand::Series {
                games,
                max_plies,
                seed,
            } => {
                let tally = run_series(&self.layout, games, max_plies, seed.or(self.seed));
                println!("{tally}");
            }

            EngineCommand::Splitperft { depth } => {
                print_perft::<true>(self.session.board(), &self.turn(), depth);
            }

            EngineCommand::Status => println!("{}", self.session.status()),

            // Handled by the main loop
            EngineCommand::Exit => {}
        }

        Ok(())
    }

    /// A copy of the session's turn state machine, for read-only analysis.
    fn turn(&self) -> TurnController {
        TurnController::with_state(self.session.turn_state())
    }

    /// Restarts the game from the engine's current layout.
    fn new_game(&mut self) {
        self.session.reset(&self.layout);
        self.announced = false;
        info!("New game");
    }

    /// Executes the `auto` command, playing computer moves without waiting until a human is to move.
    fn auto(&mut self) -> Result<()> {
        if Color::all()
            .into_iter()
            .all(|color| self.session.controller(color).is_computer())
        {
            bail!("Both sides are computer-controlled; use `series` to play whole games");
        }

        while let Some(outcome) = self.session.play_automated_move() {
            self.report(&outcome);
        }

        Ok(())
    }

    /// Executes the `click` command.
    fn click(&mut self, square: Square) -> Result<()> {
        if self.session.is_computer_to_move() {
            bail!("{} is controlled by the computer", self.session.side_to_move());
        }

        match self.session.click(square) {
            ClickOutcome::Selected(square) => {
                self.moves(Some(square), false);
            }
            ClickOutcome::Moved(outcome) => self.report(&outcome),
            ClickOutcome::Rejected => bail!(
                "Nothing to select or move to on {square} ({})",
                self.session.turn_state()
            ),
        }

        Ok(())
    }

    /// Executes the `moves` command, printing all legal moves or only those starting on `square`.
    fn moves(&self, square: Option<Square>, sort: bool) {
        let mut moves = self.session.legal_moves();
        if let Some(square) = square {
            moves.retain(|mv| mv.from() == square);
        }
        if sort {
            moves.sort();
        }

        // If there are none, print "(none)"
        let moves_string = if moves.is_empty() {
            String::from("(none)")
        } else {
            // Otherwise, join them by comma-space
            moves
                .into_iter()
                .map(|mv| mv.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("{moves_string}");
    }

    /// Plays a single move for a computer-controlled side.
    fn play_automated_move(&mut self) {
        if let Some(outcome) = self.session.play_automated_move() {
            self.report(&outcome);
        }
    }

    /// Prints what a move did.
    fn report(&self, outcome: &MoveOutcome) {
        let mover = self.session.board().piece(outcome.piece).color();
        println!("{mover} plays {}", outcome.mv);

        if outcome.promoted {
            println!("{mover} is crowned on {}", outcome.mv.to());
        }
        if !outcome.turn_passed() {
            println!("{mover} must keep capturing from {}", outcome.mv.to());
        }
    }

    /// Prints the winner once, when the game first ends.
    fn announce_result(&mut self) {
        if self.announced {
            return;
        }

        if let Some(winner) = self.session.winner() {
            println!("Game over: {winner} wins");
            info!("{winner} won after {} moves", self.session.plies());
            self.announced = true;
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(256);

    loop {
        // Clear the buffer, read input, and trim the trailing newline
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing commands")?;

        // For ctrl + d
        if 0 == bytes {
            // Send the Exit command and exit this function
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            bail!("Engine received input of 0 bytes and is quitting");
        }

        // Trim any leading/trailing whitespace
        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match EngineCommand::try_parse_from(buf.split_ascii_whitespace()) {
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // If an invalid command was received, just print the error and continue running
            Err(err) => eprintln!("{err}"),
        }
    }
}
