//! The interactive shell: sign-up, sign-in and notes views in one loop.
//!
//! One shell is one page lifetime. The session cookie lives in the
//! client's cookie store for as long as the shell runs.

use crate::command::{Command, ShellLine};
use crate::prompt::Prompt;
use jotter_client::{ClientError, JotterClient, OtpVerification, SessionEvent};
use jotter_core::{
    format_countdown, GuardState, Note, NoteDraft, NoteId, NoteList, OtpFlow, OtpStage, User,
};
use std::io::Write;
use std::time::Instant;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

const ACCESS_DENIED: &str = "Access Denied. Please log in to access this page (signin / signup).";

/// What the shell should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Details of the last code request, kept for `resend`
#[derive(Debug, Clone)]
enum CodeRequest {
    Signup {
        name: String,
        dob: String,
        email: String,
    },
    Signin {
        email: String,
    },
}

pub struct Shell<P, W> {
    client: JotterClient,
    prompt: P,
    out: W,
    otp: OtpFlow,
    pending: Option<CodeRequest>,
    notes: NoteList,
    events: broadcast::Receiver<SessionEvent>,
}

impl<P: Prompt, W: Write> Shell<P, W> {
    pub fn new(client: JotterClient, prompt: P, out: W) -> Self {
        let events = client.subscribe();
        Self {
            client,
            prompt,
            out,
            otp: OtpFlow::new(),
            pending: None,
            notes: NoteList::new(),
            events,
        }
    }

    /// Use a custom OTP flow (e.g. a shorter resend cooldown)
    pub fn with_otp_flow(mut self, otp: OtpFlow) -> Self {
        self.otp = otp;
        self
    }

    pub fn client(&self) -> &JotterClient {
        &self.client
    }

    pub fn notes(&self) -> &NoteList {
        &self.notes
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Restore the session and show the landing view.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "Loading...")?;
        let session = self.client.session().initialize().await;
        match session.guard() {
            GuardState::Authorized(user) => {
                writeln!(self.out, "Welcome back, {}!", user.name)?;
                self.load_notes().await?;
            }
            GuardState::Unauthorized | GuardState::Loading => {
                writeln!(self.out, "Sign in with `signin` or create an account with `signup`.")?;
            }
        }
        self.drain_events()
    }

    /// Read and dispatch commands until `quit` or end of input.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.start().await?;
        loop {
            let Some(line) = self.prompt.read_line("jotter> ") else {
                break;
            };
            let command = match ShellLine::parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(self.out, "{}", e.render())?;
                    continue;
                }
            };
            if self.handle(command).await? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    pub async fn handle(&mut self, command: Command) -> anyhow::Result<Flow> {
        debug!(command = ?command, "Handling command");
        match command {
            Command::Signup => self.signup().await?,
            Command::Signin { email } => self.signin(email).await?,
            Command::Verify { code } => self.verify(&code).await?,
            Command::Resend => self.resend().await?,
            Command::Reset => {
                self.otp.reset();
                self.pending = None;
                writeln!(self.out, "Start again with `signup` or `signin`.")?;
            }
            Command::Me => self.me()?,
            Command::Notes => {
                if self.require_user()?.is_some() {
                    self.load_notes().await?;
                }
            }
            Command::New => self.create_note().await?,
            Command::Edit { id } => self.edit_note(NoteId::new(id)).await?,
            Command::Rm { id } => self.delete_note(NoteId::new(id)).await?,
            Command::Google => {
                let result = self.client.auth().google_auth_url().await;
                match result {
                    Ok(google) => writeln!(self.out, "Continue with Google: {}", google.auth_url)?,
                    Err(e) => self.report("Google sign-in", &e)?,
                }
            }
            Command::Logout => {
                self.client.session().logout().await;
                self.notes = NoteList::new();
                self.otp.reset();
                self.pending = None;
                writeln!(self.out, "Signed out.")?;
            }
            Command::Help => self.help()?,
            Command::Quit => return Ok(Flow::Quit),
        }
        self.drain_events()?;
        Ok(Flow::Continue)
    }

    // -------------------------------------------------------------------------
    // Sign-up / sign-in
    // -------------------------------------------------------------------------

    async fn signup(&mut self) -> anyhow::Result<()> {
        let Some(name) = self.ask("Your Name: ") else {
            return Ok(());
        };
        let Some(dob) = self.ask("Date of Birth (YYYY-MM-DD): ") else {
            return Ok(());
        };
        let Some(email) = self.ask("Email: ") else {
            return Ok(());
        };
        self.request_code(CodeRequest::Signup { name, dob, email })
            .await
    }

    async fn signin(&mut self, email: Option<String>) -> anyhow::Result<()> {
        let email = match email {
            Some(email) => email,
            None => match self.ask("Email: ") {
                Some(email) => email,
                None => return Ok(()),
            },
        };
        self.request_code(CodeRequest::Signin { email }).await
    }

    async fn request_code(&mut self, request: CodeRequest) -> anyhow::Result<()> {
        if matches!(self.otp.stage(), OtpStage::Verified(_)) {
            self.otp.reset();
        }
        let (result, email, fallback) = match &request {
            CodeRequest::Signup { name, dob, email } => (
                self.client.auth().signup(name, dob, email).await,
                email.trim().to_string(),
                "sign up problem please refresh",
            ),
            CodeRequest::Signin { email } => (
                self.client.auth().signin(email).await,
                email.trim().to_string(),
                "OTP verification failed",
            ),
        };

        match result {
            Ok(ack) if ack.success => {
                self.otp.code_sent(email.clone(), Instant::now())?;
                self.pending = Some(request);
                writeln!(
                    self.out,
                    "A code was sent to {}. Enter it with `verify <code>`.",
                    email
                )?;
            }
            Ok(ack) => {
                let message = ack.message.unwrap_or_else(|| fallback.to_string());
                writeln!(self.out, "{}", message)?;
            }
            Err(e) => self.report("Requesting a code", &e)?,
        }
        Ok(())
    }

    async fn verify(&mut self, code: &str) -> anyhow::Result<()> {
        let Some(email) = self.otp.pending_email().map(str::to_owned) else {
            writeln!(self.out, "No code pending. Use `signup` or `signin` first.")?;
            return Ok(());
        };

        let result = self.client.verify_and_login(&email, code).await;
        match result {
            Ok(OtpVerification::Verified(user)) => {
                writeln!(self.out, "Welcome, {}!", user.name)?;
                self.otp.verified(user)?;
                self.pending = None;
                self.load_notes().await?;
            }
            Ok(OtpVerification::Rejected(message)) => writeln!(self.out, "{}", message)?,
            Err(e) => self.report("Verification", &e)?,
        }
        Ok(())
    }

    async fn resend(&mut self) -> anyhow::Result<()> {
        let now = Instant::now();
        let Some(request) = self.pending.clone() else {
            writeln!(self.out, "No code pending. Use `signup` or `signin` first.")?;
            return Ok(());
        };
        if !self.otp.can_resend(now) {
            writeln!(
                self.out,
                "Resend OTP in {}",
                format_countdown(self.otp.resend_remaining(now))
            )?;
            return Ok(());
        }
        self.request_code(request).await
    }

    // -------------------------------------------------------------------------
    // Notes
    // -------------------------------------------------------------------------

    fn me(&mut self) -> anyhow::Result<()> {
        match self.client.session().guard() {
            GuardState::Authorized(user) => {
                writeln!(self.out, "Welcome, {}!", user.name)?;
                writeln!(self.out, "Email: {}", user.email)?;
            }
            GuardState::Loading => writeln!(self.out, "Loading...")?,
            GuardState::Unauthorized => writeln!(self.out, "Not signed in.")?,
        }
        Ok(())
    }

    /// The route guard for note commands
    fn require_user(&mut self) -> anyhow::Result<Option<User>> {
        match self.client.session().guard() {
            GuardState::Authorized(user) => Ok(Some(user)),
            GuardState::Loading => {
                writeln!(self.out, "Loading...")?;
                Ok(None)
            }
            GuardState::Unauthorized => {
                writeln!(self.out, "{}", ACCESS_DENIED)?;
                Ok(None)
            }
        }
    }

    async fn load_notes(&mut self) -> anyhow::Result<()> {
        let result = self.client.notes().list().await;
        match result {
            Ok(notes) => {
                self.notes.replace_all(notes);
                self.print_notes()?;
            }
            Err(e) => {
                warn!(error = %e, "Error fetching notes");
                writeln!(self.out, "Could not load your notes. Please sign in again.")?;
                self.otp.reset();
                self.pending = None;
            }
        }
        Ok(())
    }

    fn print_notes(&mut self) -> anyhow::Result<()> {
        if self.notes.is_empty() {
            writeln!(self.out, "No notes yet. Create your first note with `new`.")?;
            return Ok(());
        }
        writeln!(self.out, "Notes ({})", self.notes.len())?;
        for note in self.notes.iter() {
            writeln!(self.out, "{}", render_note(note))?;
        }
        Ok(())
    }

    async fn create_note(&mut self) -> anyhow::Result<()> {
        if self.require_user()?.is_none() {
            return Ok(());
        }
        let Some(draft) = self.ask_draft(None) else {
            return Ok(());
        };

        let result = self.client.notes().create(&draft).await;
        match result {
            Ok(note) => {
                writeln!(self.out, "Created {}", render_note(&note))?;
                self.notes.prepend(note);
            }
            Err(e) => self.report("Creating the note", &e)?,
        }
        Ok(())
    }

    async fn edit_note(&mut self, id: NoteId) -> anyhow::Result<()> {
        if self.require_user()?.is_none() {
            return Ok(());
        }
        let current = self.notes.get(&id).cloned();
        let Some(draft) = self.ask_draft(current.as_ref()) else {
            return Ok(());
        };

        let result = self.client.notes().update(&id, &draft).await;
        match result {
            Ok(_) => {
                if self.notes.apply_edit(&id, &draft).is_err() {
                    debug!(note_id = %id, "Edited note was not in the local list");
                }
                writeln!(self.out, "Updated {}", id)?;
            }
            Err(e) => self.report("Updating the note", &e)?,
        }
        Ok(())
    }

    async fn delete_note(&mut self, id: NoteId) -> anyhow::Result<()> {
        if self.require_user()?.is_none() {
            return Ok(());
        }
        let result = self.client.notes().delete(&id).await;
        match result {
            Ok(()) => {
                self.notes.remove(&id);
                writeln!(self.out, "Deleted {}", id)?;
            }
            Err(e) => self.report("Deleting the note", &e)?,
        }
        Ok(())
    }

    /// Prompt for title and content; blank input keeps the current value
    fn ask_draft(&mut self, current: Option<&Note>) -> Option<NoteDraft> {
        let title = self.ask("Note title: ")?;
        let content = self.ask("Note content: ")?;
        let keep = |input: String, existing: Option<&String>| match existing {
            Some(existing) if input.trim().is_empty() => existing.clone(),
            _ => input,
        };
        Some(NoteDraft::new(
            keep(title, current.map(|n| &n.title)),
            keep(content, current.map(|n| &n.content)),
        ))
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn ask(&mut self, label: &str) -> Option<String> {
        self.prompt.read_line(label).map(|line| line.trim().to_string())
    }

    /// Validation problems are shown inline; anything else is logged too.
    fn report(&mut self, action: &str, err: &ClientError) -> anyhow::Result<()> {
        match err {
            ClientError::Validation(e) => writeln!(self.out, "{}", e)?,
            _ => {
                warn!(action, error = %err, "Request failed");
                writeln!(self.out, "{} failed: {}", action, err)?;
            }
        }
        Ok(())
    }

    /// Apply interceptor signals; an expired session sends the user back
    /// to sign-in.
    fn drain_events(&mut self) -> anyhow::Result<()> {
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.client.session().apply(event);
                    if event == SessionEvent::Expired {
                        self.notes = NoteList::new();
                        self.otp.reset();
                        self.pending = None;
                        writeln!(self.out, "Your session has expired. Please sign in again.")?;
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "Missed session events");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return Ok(()),
            }
        }
    }

    fn help(&mut self) -> anyhow::Result<()> {
        let lines = [
            ("signup", "create an account"),
            ("signin [email]", "sign in with an emailed code"),
            ("verify <code>", "submit the emailed code"),
            ("resend", "send the code again"),
            ("reset", "change your details"),
            ("me", "show who is signed in"),
            ("notes", "list your notes"),
            ("new", "create a note"),
            ("edit <id>", "edit a note"),
            ("rm <id>", "delete a note"),
            ("google", "continue with Google"),
            ("logout", "sign out"),
            ("quit", "leave"),
        ];
        for (command, description) in lines {
            writeln!(self.out, "  {:<16} {}", command, description)?;
        }
        Ok(())
    }
}

fn render_note(note: &Note) -> String {
    format!(
        "[{}] {} ({})\n    {}",
        note.id,
        note.title,
        note.created_at.format("%b %-d, %Y"),
        note.content
    )
}
