//! Command-line front end
//!
//! Parses arguments into document commands and prints the derived views.

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use schoolhub::app::AppState;
use schoolhub::config::DEFAULT_NOTE_SUBJECT;
use schoolhub::services::curriculum::{GcseWizard, MflSelection, Mfl, Wizard, YearGroup};
use schoolhub::services::HydrationEvent;
use schoolhub::store::models::{
    BookLocation, CreateBookRequest, CreateCustomItemRequest, CreateEventRequest,
    CreateNoteRequest, CreateSubjectRequest, CreateTaskRequest, CreateTestRequest, EventSchedule,
    EventType, RelocateRequest, UpdateSubjectRequest,
};
use schoolhub::store::{AppDocument, Command, WeekLayout, Widget};
use schoolhub::views::dashboard::{
    completed_tasks, filter_notes, pending_tasks, sorted_tests, subjects_with_books,
};
use schoolhub::views::dates::{format_date, week_days};
use schoolhub::views::{agenda_for, dashboard, week_agenda, week_meal_plan, DayAgenda};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "schoolhub", version, about = "Student organizer for notes, tests, tasks and timetables")]
pub struct Cli {
    /// Data directory (defaults to $SCHOOLHUB_DATA_DIR or ./.schoolhub)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Home screen summary
    Today,
    /// Everything scheduled for one day
    Day { date: NaiveDate },
    /// Agenda for a displayed week
    Week {
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    #[command(subcommand)]
    Note(NoteCommand),
    #[command(subcommand)]
    Test(TestCommand),
    #[command(subcommand)]
    Task(TaskCommand),
    #[command(subcommand)]
    Book(BookCommand),
    #[command(subcommand)]
    Meal(MealCommand),
    /// Weekly food plan
    #[command(subcommand)]
    Plan(PlanCommand),
    #[command(subcommand)]
    Event(EventCommand),
    #[command(subcommand)]
    Subject(SubjectCommand),
    /// Daily water counter
    #[command(subcommand)]
    Water(WaterCommand),
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Add the school's subjects for the configured year group
    Curriculum(CurriculumArgs),
    /// Write the whole document to school-hub-export.json
    Export {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Print the wellbeing survey link when the school offers one
    Wellbeing,
    /// Keep running and reset the water counter at midnight
    Watch,
}

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    Add {
        text: String,
        #[arg(long, default_value = DEFAULT_NOTE_SUBJECT)]
        subject: String,
    },
    List {
        /// Filter by subject
        #[arg(long)]
        subject: Option<String>,
    },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum TestCommand {
    Add {
        subject: String,
        date: NaiveDate,
        #[arg(long)]
        time: Option<NaiveTime>,
        #[arg(long, default_value = "")]
        details: String,
    },
    List,
    Delete { id: String },
    /// Put a test on the calendar
    Schedule { id: String },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    Add {
        text: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    List,
    Toggle { id: String },
    Delete { id: String },
    ClearCompleted,
}

#[derive(Debug, Subcommand)]
pub enum BookCommand {
    Add {
        name: String,
        #[command(flatten)]
        place: PlaceArgs,
    },
    /// Add a book named after a subject
    AddFor {
        subject: String,
        #[command(flatten)]
        place: PlaceArgs,
    },
    List,
    Move {
        id: String,
        #[command(flatten)]
        place: PlaceArgs,
    },
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct PlaceArgs {
    /// class, locker, home or other
    #[arg(long, default_value = "home")]
    location: BookLocation,
    /// Location text used with `other`
    #[arg(long)]
    custom: Option<String>,
}

impl PlaceArgs {
    fn into_relocate(self) -> RelocateRequest {
        RelocateRequest {
            location: self.location,
            custom_location: self.custom,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum MealCommand {
    Add { name: String },
    List,
    Delete { name: String },
    /// Add the starter meals that are missing
    Seed,
}

#[derive(Debug, Subcommand)]
pub enum PlanCommand {
    Show {
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    Assign { date: NaiveDate, meal: String },
    Remove { date: NaiveDate, meal: String },
    Set { date: NaiveDate, meals: Vec<String> },
    ClearWeek {
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
}

#[derive(Debug, Subcommand)]
pub enum EventCommand {
    Add(EventArgs),
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Update {
        id: String,
        #[command(flatten)]
        event: EventArgs,
    },
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct EventArgs {
    title: String,
    /// ECA, Library, Test, Reminder or Other
    #[arg(long, default_value = "Other")]
    kind: EventType,
    #[arg(long)]
    color: Option<String>,
    /// One-off date
    #[arg(long, conflicts_with = "weekly")]
    date: Option<NaiveDate>,
    /// Weekdays for a weekly event, 0 = Sunday (e.g. 1,3)
    #[arg(long, value_delimiter = ',')]
    weekly: Vec<u8>,
    #[arg(long)]
    time: Option<NaiveTime>,
}

impl EventArgs {
    fn into_request(self) -> anyhow::Result<CreateEventRequest> {
        let schedule = match (self.date, self.weekly.is_empty()) {
            (Some(date), true) => EventSchedule::Once(date),
            (None, false) => EventSchedule::Weekly(self.weekly),
            _ => bail!("Give either --date or --weekly"),
        };

        Ok(CreateEventRequest {
            title: self.title,
            kind: self.kind,
            color: self.color,
            schedule,
            time: self.time,
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum SubjectCommand {
    Add {
        name: String,
        #[arg(long, default_value = "")]
        color: String,
        /// The subject has an exercise book
        #[arg(long)]
        book: bool,
        #[arg(long)]
        teacher: Option<String>,
        #[arg(long)]
        room: Option<String>,
    },
    List,
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        book: Option<bool>,
        #[arg(long)]
        teacher: Option<String>,
        #[arg(long)]
        room: Option<String>,
    },
    Delete { id: String },
    /// Track an extra item (kit, folder) for a subject
    AddItem {
        subject_id: String,
        name: String,
        #[command(flatten)]
        place: PlaceArgs,
    },
    MoveItem {
        subject_id: String,
        item_id: String,
        #[command(flatten)]
        place: PlaceArgs,
    },
    DeleteItem { subject_id: String, item_id: String },
}

#[derive(Debug, Subcommand)]
pub enum WaterCommand {
    Status,
    Add,
    Remove,
    Reset,
    /// Hide the goal-reached message
    Dismiss,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    Set {
        /// sun-thu, mon-fri or full-week
        #[arg(long)]
        layout: Option<WeekLayout>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        school: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        hydration_goal: Option<u32>,
        #[arg(long)]
        show_header: Option<bool>,
    },
    /// Show or hide a home screen widget
    Widget { widget: Widget },
}

#[derive(Debug, Args)]
pub struct CurriculumArgs {
    /// Year group, overriding the one in settings
    #[arg(long)]
    year: Option<YearGroup>,
    /// Languages for Years 5 to 9, or the optional GCSE language
    #[arg(long)]
    mfl: Vec<Mfl>,
    #[arg(long)]
    science: Option<String>,
    #[arg(long)]
    humanities: Option<String>,
    #[arg(long)]
    arts: Vec<String>,
    #[arg(long)]
    additional: Vec<String>,
}

pub async fn run(state: &AppState, command: CliCommand, today: NaiveDate) -> anyhow::Result<()> {
    match command {
        CliCommand::Today => {
            let doc = state.document().await;
            print_dashboard(&doc, today);
        }
        CliCommand::Day { date } => {
            let doc = state.document().await;
            print_agenda(&agenda_for(&doc, date));
        }
        CliCommand::Week { offset } => {
            let doc = state.document().await;
            for agenda in week_agenda(&doc, today, offset, doc.settings.week_layout) {
                print_agenda(&agenda);
            }
        }
        CliCommand::Note(command) => run_note(state, command).await?,
        CliCommand::Test(command) => run_test(state, command).await?,
        CliCommand::Task(command) => run_task(state, command).await?,
        CliCommand::Book(command) => run_book(state, command).await?,
        CliCommand::Meal(command) => run_meal(state, command).await?,
        CliCommand::Plan(command) => run_plan(state, command, today).await?,
        CliCommand::Event(command) => run_event(state, command).await?,
        CliCommand::Subject(command) => run_subject(state, command).await?,
        CliCommand::Water(command) => run_water(state, command).await,
        CliCommand::Settings(command) => run_settings(state, command).await?,
        CliCommand::Curriculum(args) => run_curriculum(state, args).await?,
        CliCommand::Export { dir } => {
            let path = match dir {
                Some(dir) => {
                    let doc = state.document().await;
                    schoolhub::services::ExportService::new(dir).export(&doc).await?
                }
                None => state.export_document().await?,
            };
            println!("Exported to {}", path.display());
        }
        CliCommand::Wellbeing => match state.document().await.settings.wellbeing_form_url() {
            Some(url) => println!("{}", url),
            None => println!("No wellbeing form for this school"),
        },
        CliCommand::Watch => watch(state, today).await?,
    }

    if state.has_unsaved_changes().await {
        eprintln!("Warning: changes could not be saved");
    }

    Ok(())
}

async fn run_note(state: &AppState, command: NoteCommand) -> anyhow::Result<()> {
    match command {
        NoteCommand::Add { text, subject } => {
            let doc = state
                .dispatch(Command::AddNote(CreateNoteRequest { subject, text }))
                .await?;
            print_id("note", doc.notes.first().map(|n| n.id.as_str()));
        }
        NoteCommand::List { subject } => {
            let doc = state.document().await;
            for note in filter_notes(&doc, subject.as_deref().unwrap_or("")) {
                println!("{}  [{}] {}", note.id, note.subject, note.text);
            }
        }
        NoteCommand::Delete { id } => {
            state.dispatch(Command::DeleteNote { id }).await?;
        }
    }
    Ok(())
}

async fn run_test(state: &AppState, command: TestCommand) -> anyhow::Result<()> {
    match command {
        TestCommand::Add {
            subject,
            date,
            time,
            details,
        } => {
            let doc = state
                .dispatch(Command::AddTest(CreateTestRequest {
                    subject,
                    date,
                    time,
                    details,
                }))
                .await?;
            print_id("test", doc.tests.last().map(|t| t.id.as_str()));
        }
        TestCommand::List => {
            let doc = state.document().await;
            for test in sorted_tests(&doc) {
                println!(
                    "{}  {} {} {} {}",
                    test.id,
                    test.date,
                    test.time.as_deref().unwrap_or("--:--"),
                    test.subject,
                    test.details
                );
            }
        }
        TestCommand::Delete { id } => {
            state.dispatch(Command::DeleteTest { id }).await?;
        }
        TestCommand::Schedule { id } => {
            let doc = state.dispatch(Command::ScheduleTest { id }).await?;
            print_id("event", doc.events.last().map(|e| e.id.as_str()));
        }
    }
    Ok(())
}

async fn run_task(state: &AppState, command: TaskCommand) -> anyhow::Result<()> {
    match command {
        TaskCommand::Add { text, subject, due } => {
            let doc = state
                .dispatch(Command::AddTask(CreateTaskRequest { text, subject, due }))
                .await?;
            print_id("task", doc.tasks.first().map(|t| t.id.as_str()));
        }
        TaskCommand::List => {
            let doc = state.document().await;
            for task in pending_tasks(&doc).into_iter().chain(completed_tasks(&doc)) {
                println!(
                    "{}  [{}] {}{}",
                    task.id,
                    if task.done { "x" } else { " " },
                    task.text,
                    task.due
                        .as_deref()
                        .map(|due| format!(" (due {})", due))
                        .unwrap_or_default()
                );
            }
        }
        TaskCommand::Toggle { id } => {
            state.dispatch(Command::ToggleTask { id }).await?;
        }
        TaskCommand::Delete { id } => {
            state.dispatch(Command::DeleteTask { id }).await?;
        }
        TaskCommand::ClearCompleted => {
            state.dispatch(Command::ClearCompletedTasks).await?;
        }
    }
    Ok(())
}

async fn run_book(state: &AppState, command: BookCommand) -> anyhow::Result<()> {
    match command {
        BookCommand::Add { name, place } => {
            let doc = state
                .dispatch(Command::AddBook(CreateBookRequest {
                    name,
                    location: place.location,
                    custom_location: place.custom,
                }))
                .await?;
            print_id("book", doc.books.first().map(|b| b.id.as_str()));
        }
        BookCommand::AddFor { subject, place } => {
            let request = CreateBookRequest::for_subject(&subject, place.location, place.custom);
            let doc = state.dispatch(Command::AddBook(request)).await?;
            print_id("book", doc.books.first().map(|b| b.id.as_str()));
        }
        BookCommand::List => {
            let doc = state.document().await;
            for book in &doc.books {
                println!("{}  {} @ {}", book.id, book.name, book.location_display());
            }
            for subject in subjects_with_books(&doc) {
                for item in &subject.custom_items {
                    println!("{}  {} ({}) @ {}", item.id, item.name, subject.name, item.location_display());
                }
            }
        }
        BookCommand::Move { id, place } => {
            state
                .dispatch(Command::UpdateBook {
                    id,
                    update: place.into_relocate(),
                })
                .await?;
        }
        BookCommand::Delete { id } => {
            state.dispatch(Command::DeleteBook { id }).await?;
        }
    }
    Ok(())
}

async fn run_meal(state: &AppState, command: MealCommand) -> anyhow::Result<()> {
    match command {
        MealCommand::Add { name } => {
            state.dispatch(Command::AddMeal { name }).await?;
        }
        MealCommand::List => {
            for meal in &state.document().await.meals {
                println!("{}", meal);
            }
        }
        MealCommand::Delete { name } => {
            state.dispatch(Command::DeleteMeal { name }).await?;
        }
        MealCommand::Seed => {
            let doc = state.dispatch(Command::SeedMeals).await?;
            println!("{} meals", doc.meals.len());
        }
    }
    Ok(())
}

async fn run_plan(state: &AppState, command: PlanCommand, today: NaiveDate) -> anyhow::Result<()> {
    match command {
        PlanCommand::Show { offset } => {
            let doc = state.document().await;
            for (day, meals) in week_meal_plan(&doc, today, offset, doc.settings.week_layout) {
                println!("{} {}: {}", format_date(day), day.format("%a"), meals.join(", "));
            }
        }
        PlanCommand::Assign { date, meal } => {
            state.dispatch(Command::AssignMeal { date, meal }).await?;
        }
        PlanCommand::Remove { date, meal } => {
            state.dispatch(Command::RemoveMealFromDay { date, meal }).await?;
        }
        PlanCommand::Set { date, meals } => {
            state.dispatch(Command::SetDayMeals { date, meals }).await?;
        }
        PlanCommand::ClearWeek { offset } => {
            let layout = state.document().await.settings.week_layout;
            let dates = week_days(today, offset, layout);
            state.dispatch(Command::ClearWeek { dates }).await?;
        }
    }
    Ok(())
}

async fn run_event(state: &AppState, command: EventCommand) -> anyhow::Result<()> {
    match command {
        EventCommand::Add(args) => {
            let doc = state.dispatch(Command::AddEvent(args.into_request()?)).await?;
            print_id("event", doc.events.last().map(|e| e.id.as_str()));
        }
        EventCommand::List { date } => {
            let doc = state.document().await;
            let events: Vec<_> = match date {
                Some(day) => schoolhub::views::events_on(&doc, day),
                None => doc.events.iter().collect(),
            };
            for event in events {
                let when = if event.repeat_weekly {
                    let days: Vec<String> = event.days.iter().map(u8::to_string).collect();
                    format!("weekly {}", days.join(","))
                } else {
                    event.date.clone()
                };
                println!("{}  {} [{}] {}", event.id, event.title, event.kind, when);
            }
        }
        EventCommand::Update { id, event } => {
            state
                .dispatch(Command::UpdateEvent {
                    id,
                    event: event.into_request()?,
                })
                .await?;
        }
        EventCommand::Delete { id } => {
            state.dispatch(Command::DeleteEvent { id }).await?;
        }
    }
    Ok(())
}

async fn run_subject(state: &AppState, command: SubjectCommand) -> anyhow::Result<()> {
    match command {
        SubjectCommand::Add {
            name,
            color,
            book,
            teacher,
            room,
        } => {
            let doc = state
                .dispatch(Command::AddSubject(CreateSubjectRequest {
                    name,
                    color,
                    has_book: book,
                    teacher,
                    room,
                }))
                .await?;
            print_id("subject", doc.subjects.last().map(|s| s.id.as_str()));
        }
        SubjectCommand::List => {
            for subject in &state.document().await.subjects {
                println!(
                    "{}  {} {}{}",
                    subject.id,
                    subject.name,
                    subject.color,
                    if subject.has_book { " (book)" } else { "" }
                );
            }
        }
        SubjectCommand::Update {
            id,
            name,
            color,
            book,
            teacher,
            room,
        } => {
            let update = UpdateSubjectRequest {
                name,
                color,
                has_book: book,
                teacher,
                room,
            };
            state.dispatch(Command::UpdateSubject { id, update }).await?;
        }
        SubjectCommand::Delete { id } => {
            state.dispatch(Command::DeleteSubject { id }).await?;
        }
        SubjectCommand::AddItem {
            subject_id,
            name,
            place,
        } => {
            let item = CreateCustomItemRequest {
                name,
                location: place.location,
                custom_location: place.custom,
            };
            state
                .dispatch(Command::AddCustomItem { subject_id, item })
                .await?;
        }
        SubjectCommand::MoveItem {
            subject_id,
            item_id,
            place,
        } => {
            state
                .dispatch(Command::UpdateCustomItem {
                    subject_id,
                    item_id,
                    update: place.into_relocate(),
                })
                .await?;
        }
        SubjectCommand::DeleteItem {
            subject_id,
            item_id,
        } => {
            state
                .dispatch(Command::DeleteCustomItem {
                    subject_id,
                    item_id,
                })
                .await?;
        }
    }
    Ok(())
}

async fn run_water(state: &AppState, command: WaterCommand) {
    let goal = state.document().await.settings.hydration_goal;
    let status = match command {
        WaterCommand::Status => state.hydration.status(goal).await,
        WaterCommand::Add => state.hydration.increment(goal).await,
        WaterCommand::Remove => state.hydration.decrement(goal).await,
        WaterCommand::Reset => state.hydration.reset(goal).await,
        WaterCommand::Dismiss => {
            state.hydration.dismiss_goal_popup().await;
            state.hydration.status(goal).await
        }
    };

    println!("Water: {}/{} glasses", status.progress, status.goal);
    if status.goal_popup {
        println!("Goal reached! Well done staying hydrated.");
    }
}

async fn run_settings(state: &AppState, command: SettingsCommand) -> anyhow::Result<()> {
    match command {
        SettingsCommand::Show => {
            let doc = state.document().await;
            println!("{}", serde_json::to_string_pretty(&doc.settings)?);
        }
        SettingsCommand::Set {
            layout,
            name,
            school,
            year,
            hydration_goal,
            show_header,
        } => {
            let mut settings = state.document().await.settings.clone();
            if let Some(layout) = layout {
                settings.week_layout = layout;
            }
            if let Some(name) = name {
                settings.user_name = name;
            }
            if let Some(school) = school {
                settings.school = school;
            }
            if let Some(year) = year {
                settings.year_group = year;
            }
            if let Some(goal) = hydration_goal {
                settings.hydration_goal = goal;
            }
            if let Some(show_header) = show_header {
                settings.show_header = show_header;
            }
            state.dispatch(Command::UpdateSettings(settings)).await?;
        }
        SettingsCommand::Widget { widget } => {
            let doc = state.dispatch(Command::ToggleWidget(widget)).await?;
            let shown = doc.settings.widgets.is_visible(widget);
            println!("Widget {}", if shown { "shown" } else { "hidden" });
        }
    }
    Ok(())
}

async fn run_curriculum(state: &AppState, args: CurriculumArgs) -> anyhow::Result<()> {
    let year = match args.year {
        Some(year) => year,
        None => {
            let doc = state.document().await;
            if doc.settings.year_group.trim().is_empty() {
                bail!("Please select a year group first");
            }
            doc.settings.year_group.parse()?
        }
    };

    let subjects = match Wizard::start(year) {
        Wizard::Mfl(mut selection) => {
            select_mfls(&mut selection, &args.mfl);
            selection.confirm()?
        }
        Wizard::Gcse(mut wizard) => {
            fill_gcse(&mut wizard, &args)?;
            let mut result = None;
            while result.is_none() {
                result = wizard.next()?;
            }
            result.context("GCSE options incomplete")?
        }
    };

    let count = subjects.len();
    state.dispatch(Command::BatchAddSubjects(subjects)).await?;
    println!("Added {} {} subjects", count, year);
    Ok(())
}

fn select_mfls(selection: &mut MflSelection, mfls: &[Mfl]) {
    for mfl in mfls {
        if !selection.toggle(*mfl) {
            tracing::warn!("Ignoring extra language {}", mfl.as_str());
        }
    }
}

fn fill_gcse(wizard: &mut GcseWizard, args: &CurriculumArgs) -> anyhow::Result<()> {
    if let Some(science) = &args.science {
        wizard.select_science(science)?;
    }
    if let Some(humanities) = &args.humanities {
        wizard.select_humanities(humanities)?;
    }
    wizard.select_mfl(args.mfl.first().copied());
    for art in &args.arts {
        wizard.toggle_arts(art)?;
    }
    for extra in &args.additional {
        wizard.toggle_additional(extra)?;
    }
    Ok(())
}

async fn watch(state: &AppState, today: NaiveDate) -> anyhow::Result<()> {
    // Keep any --today override, moving forward with the clock
    let shift = today.signed_duration_since(Local::now().date_naive());
    let mut events = state.hydration.subscribe();
    let scheduler = state.hydration.clone().start_scheduler(move || {
        let now = Local::now().date_naive();
        now.checked_add_signed(shift).unwrap_or(now)
    });

    println!("Watching; press Ctrl+C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Ok(HydrationEvent::DailyReset { date }) => {
                    println!("Water counter reset for {}", format_date(date));
                }
                Ok(HydrationEvent::GoalReached { goal }) => {
                    println!("Hydration goal of {} reached", goal);
                }
                Err(e) => {
                    tracing::warn!("Hydration events lagged: {}", e);
                }
            },
        }
    }

    scheduler.abort();
    Ok(())
}

fn print_id(kind: &str, id: Option<&str>) {
    if let Some(id) = id {
        println!("Added {} {}", kind, id);
    }
}

fn print_agenda(agenda: &DayAgenda<'_>) {
    println!("{} {}", format_date(agenda.date), agenda.date.format("%A"));
    if agenda.is_empty() {
        println!("  nothing planned");
        return;
    }
    for event in &agenda.events {
        println!("  event  {} {}", event.time.as_deref().unwrap_or(""), event.title);
    }
    for test in &agenda.tests {
        println!("  test   {} {}", test.time.as_deref().unwrap_or(""), test.subject);
    }
    for task in &agenda.tasks {
        println!("  task   {}", task.text);
    }
    if !agenda.meals.is_empty() {
        println!("  meals  {}", agenda.meals.join(", "));
    }
}

fn print_dashboard(doc: &AppDocument, today: NaiveDate) {
    let view = dashboard(doc, today);

    if !doc.settings.user_name.is_empty() {
        println!("Hi {}!", doc.settings.user_name);
    }
    println!("Today is {}", view.today.format("%A %-d %B %Y"));

    if let Some(tests) = &view.upcoming_tests {
        println!("\nUpcoming tests");
        for test in tests {
            println!("  {} {}", test.date, test.subject);
        }
    }
    if let Some(events) = &view.events {
        println!("\nToday and tomorrow");
        for event in events {
            println!("  {} [{}]", event.title, event.kind);
        }
    }
    if doc.settings.widgets.quick_todo {
        println!("\nTo do");
        for task in &view.pending_tasks {
            println!("  [ ] {}", task.text);
        }
    }
    if let (Some(today_meals), Some(tomorrow_meals)) = (view.meals_today, view.meals_tomorrow) {
        println!("\nMeals");
        println!("  today: {}", today_meals.join(", "));
        println!("  tomorrow: {}", tomorrow_meals.join(", "));
    }
}
