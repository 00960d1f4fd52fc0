use crate::run::{Run, Status};
use crossterm::{
    cursor::{self, MoveTo},
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_executor::block_on;
use futures_util::{
    future::{select, Either},
    StreamExt,
};
use std::{
    error::Error,
    future::Future,
    io::{self, Stdout, Write},
    pin::Pin,
    task::{Context, Poll},
    thread,
    time::{Duration, Instant},
};

struct RunWindow {
    stdout: Stdout,
    delay: Duration,
    last_step: Option<Instant>,
    playing: bool,
}

impl RunWindow {
    fn new(delay: Duration) -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(RunWindow {
            stdout,
            delay,
            last_step: None,
            playing: false,
        })
    }

    fn update(&mut self, run: &Run) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let width = width as usize;
        let grid = run.grid();

        queue!(self.stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        let top_bar = format!(
            "Gen: {}/{}  Cells: {}",
            grid.generation(),
            run.max_generations(),
            grid.live_count()
        );
        queue!(
            self.stdout,
            SetAttribute(Attribute::Reverse),
            Print(fit(&top_bar, width)),
            SetAttribute(Attribute::Reset)
        )?;

        let plaintext = grid.to_string();
        for (y, line) in plaintext
            .lines()
            .take(height.saturating_sub(2) as usize)
            .enumerate()
        {
            queue!(self.stdout, MoveTo(0, y as u16 + 1), Print(fit(line, width)))?;
        }

        let status_str = match run.status() {
            Status::Running if self.playing => "Playing. Press [p] to pause, [q] to quit.",
            Status::Running => "Press [space] to step, [p] to play. Press [q] to quit.",
            Status::Stabilized => "Repeated configuration. Press [q] to quit.",
            Status::Exhausted => "Generation budget reached. Press [q] to quit.",
        };
        queue!(
            self.stdout,
            MoveTo(0, height.saturating_sub(1)),
            SetAttribute(Attribute::Reverse),
            Print(fit(status_str, width)),
            SetAttribute(Attribute::Reset)
        )?;
        self.stdout.flush()
    }

    /// Whether enough time has passed since the last step.
    fn ready(&self) -> bool {
        self.last_step
            .map_or(true, |instant| instant.elapsed() >= self.delay)
    }

    /// When the next generation is due while playing.
    fn next_step(&self) -> Instant {
        self.last_step
            .map_or_else(Instant::now, |instant| instant + self.delay)
    }

    fn step(&mut self, run: &mut Run) -> Result<(), Box<dyn Error>> {
        run.advance()?;
        self.last_step = Some(Instant::now());
        self.update(run)?;
        Ok(())
    }

    fn quit(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

/// Cuts a line to the width of the terminal.
fn fit(line: &str, width: usize) -> String {
    line.chars().take(width).collect()
}

/// A future that completes at a given instant.
///
/// The first poll before the deadline starts a thread that sleeps until
/// then and wakes the task.
struct Tick {
    deadline: Instant,
    armed: bool,
}

impl Tick {
    fn at(deadline: Instant) -> Self {
        Tick {
            deadline,
            armed: false,
        }
    }
}

impl Future for Tick {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let now = Instant::now();
        if now >= self.deadline {
            return Poll::Ready(());
        }
        if !self.armed {
            let waker = cx.waker().clone();
            let remaining = self.deadline - now;
            thread::spawn(move || {
                thread::sleep(remaining);
                waker.wake();
            });
            self.armed = true;
        }
        Poll::Pending
    }
}

async fn event_loop(window: &mut RunWindow, run: &mut Run) -> Result<(), Box<dyn Error>> {
    let mut reader = EventStream::new();
    window.update(run)?;

    loop {
        let event = if window.playing && run.status() == Status::Running {
            match select(reader.next(), Tick::at(window.next_step())).await {
                Either::Left((event, _)) => event,
                Either::Right(((), _)) => {
                    window.step(run)?;
                    continue;
                }
            }
        } else {
            reader.next().await
        };
        let Some(event) = event else {
            break;
        };

        match event? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if run.status() == Status::Running && !window.playing && window.ready() {
                        window.step(run)?;
                    }
                }
                KeyCode::Char('p') => {
                    window.playing = !window.playing;
                    window.update(run)?;
                }
                _ => (),
            },
            Event::Resize(_, _) => window.update(run)?,
            _ => (),
        }
    }
    Ok(())
}

/// An interactive view of the run: one step per key press,
/// or one step every `delay` while playing.
///
/// Prints the last generation after leaving the TUI.
pub(crate) fn run_with_tui(mut run: Run, delay: Duration) -> Result<(), Box<dyn Error>> {
    let mut window = RunWindow::new(delay)?;
    let result = block_on(event_loop(&mut window, &mut run));
    window.quit()?;
    result?;
    print!("{}", run.grid());
    println!(
        "Generation: {}  Cells: {}",
        run.grid().generation(),
        run.grid().live_count()
    );
    Ok(())
}
