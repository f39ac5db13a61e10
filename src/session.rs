//! One turtle, one environment and one renderer wired to a shared stream.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::command::RawCommand;
use crate::environment::{Environment, EnvironmentConfig};
use crate::errors::{ScriptError, TurtleError};
use crate::render::{AnySurface, Renderer, SvgOptions, SvgSurface};
use crate::script;
use crate::stream::{Stream, SubscriptionId};
use crate::turtle::Turtle;
use crate::update::{TurtleState, Update};

pub struct Session {
    stream: Stream<Update>,
    turtle: Turtle<Stream<Update>>,
    environment: Environment<Stream<Update>>,
    renderer: Rc<RefCell<Renderer<AnySurface>>>,
    log: Rc<RefCell<Vec<Update>>>,
}

impl Session {
    /// A session that renders to SVG with default styling
    pub fn new(config: EnvironmentConfig) -> Self {
        let viewport = crate::environment::Viewport::new(config.width, config.height);
        Self::with_surface(config, SvgSurface::new(viewport, SvgOptions::default()))
    }

    pub fn with_surface(config: EnvironmentConfig, surface: impl Into<AnySurface>) -> Self {
        let stream = Stream::new();
        let environment = Environment::with_config(stream.clone(), config);
        let initial = TurtleState::default();

        let renderer = Rc::new(RefCell::new(Renderer::new(
            environment.viewport(),
            initial.clone(),
            environment.background_color(),
            surface.into(),
        )));
        let log = Rc::new(RefCell::new(Vec::new()));

        {
            let log = Rc::clone(&log);
            stream.subscribe(move |update: &Update| log.borrow_mut().push(update.clone()));
        }
        {
            let renderer = Rc::clone(&renderer);
            stream.subscribe(move |update: &Update| renderer.borrow_mut().apply(update));
        }

        Session {
            turtle: Turtle::with_state(stream.clone(), initial),
            environment,
            stream,
            renderer,
            log,
        }
    }

    pub fn turtle(&self) -> &Turtle<Stream<Update>> {
        &self.turtle
    }

    pub fn turtle_mut(&mut self) -> &mut Turtle<Stream<Update>> {
        &mut self.turtle
    }

    pub fn environment(&self) -> &Environment<Stream<Update>> {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment<Stream<Update>> {
        &mut self.environment
    }

    /// Attach another observer to the shared update stream
    pub fn subscribe(&self, callback: impl FnMut(&Update) + 'static) -> SubscriptionId {
        self.stream.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.stream.unsubscribe(id)
    }

    /// Dispatch one raw command to the turtle
    pub fn handle_command(&mut self, command: &RawCommand) -> Result<(), TurtleError> {
        self.turtle.handle_command(command)
    }

    /// Run a script against this session's turtle
    pub fn run_script(&mut self, name: &str, source: &str) -> Result<usize, ScriptError> {
        script::run(name, source, &mut self.turtle)
    }

    /// Every update seen on the stream since the last [`Session::take_updates`],
    /// in delivery order. Release the borrow before driving the turtle again.
    pub fn updates(&self) -> Ref<'_, [Update]> {
        Ref::map(self.log.borrow(), |log| log.as_slice())
    }

    /// Drain the update log
    pub fn take_updates(&mut self) -> Vec<Update> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// The renderer's current output as text
    pub fn render(&self) -> String {
        self.renderer.borrow().surface().render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;
    use crate::update::{EnvironmentUpdate, TurtleUpdate};

    fn recording(config: EnvironmentConfig) -> Session {
        Session::with_surface(config, RecordingSurface::new())
    }

    #[test]
    fn square_renders_four_lines() {
        let mut session = Session::new(EnvironmentConfig::default());
        let applied = session
            .run_script("square", "fd 100; lt 90; fd 100; lt 90; fd 100; lt 90; fd 100")
            .unwrap();
        assert_eq!(applied, 7);

        let svg = session.render();
        assert_eq!(svg.matches("<line").count(), 4);
        assert!(svg.contains("<polygon"));
        assert!(svg.contains(r#"viewBox="0 0 768 400""#), "{svg}");
    }

    #[test]
    fn updates_are_logged_in_order() {
        let mut session = recording(EnvironmentConfig::default());
        session.turtle_mut().forward(10.0);
        session.environment_mut().set_background_color("navy");

        let updates = session.take_updates();
        assert_eq!(updates.len(), 3);
        assert!(matches!(&updates[0], Update::Turtle(u) if u.is_begin()));
        assert_eq!(
            updates[1],
            Update::Turtle(TurtleUpdate::Position { x: 10.0, y: 0.0 })
        );
        assert_eq!(
            updates[2],
            Update::Environment(EnvironmentUpdate::BackgroundColor {
                color: "navy".to_string()
            })
        );
    }

    #[test]
    fn recording_surface_output() {
        let config = EnvironmentConfig {
            width: 200.0,
            height: 100.0,
            ..EnvironmentConfig::default()
        };
        let mut session = recording(config);
        session.handle_command(&RawCommand::new("fd", Some(50.0))).unwrap();
        let ops = session.render();
        let lines: Vec<&str> = ops.lines().collect();
        assert_eq!(lines[0], "background black");
        assert!(ops.contains("segment (100, 50) -> (150, 50) white"), "{ops}");
    }

    #[test]
    fn renderer_follows_turtle() {
        let mut session = Session::new(EnvironmentConfig::default());
        session.run_script("walk", "fd 30\nrt 45\npu\nfd 10").unwrap();
        let turtle_state = session.turtle().state();
        assert_eq!(session.renderer.borrow().view().turtle, turtle_state);
    }

    #[test]
    fn unknown_command_is_rejected_without_updates() {
        let mut session = recording(EnvironmentConfig::default());
        let err = session
            .handle_command(&RawCommand::new("spin", Some(1.0)))
            .unwrap_err();
        assert_eq!(
            err,
            TurtleError::UnsupportedCommand {
                kind: "spin".to_string()
            }
        );
        assert!(session.updates().is_empty());
    }

    #[test]
    fn extra_subscribers_see_updates() {
        let session_seen = Rc::new(RefCell::new(0));
        let mut session = recording(EnvironmentConfig::default());
        let counter = Rc::clone(&session_seen);
        let id = session.subscribe(move |_| *counter.borrow_mut() += 1);

        session.turtle_mut().pen_up();
        assert_eq!(*session_seen.borrow(), 2);

        assert!(session.unsubscribe(id));
        session.turtle_mut().pen_down();
        assert_eq!(*session_seen.borrow(), 2);
    }

    #[test]
    fn background_from_config() {
        let config = EnvironmentConfig {
            background_color: "Red".to_string(),
            ..EnvironmentConfig::default()
        };
        let session = Session::new(config);
        assert!(session.render().contains(r#"fill="Red""#));
        assert_eq!(session.environment().background_color(), "Red");
    }

    #[test]
    fn take_updates_drains_the_log() {
        let mut session = recording(EnvironmentConfig::default());
        session.turtle_mut().rotate_left(90.0);
        assert_eq!(session.updates().len(), 2);

        let drained = session.take_updates();
        assert_eq!(drained.len(), 2);
        assert!(session.updates().is_empty());

        session.turtle_mut().pen_up();
        let updates = session.updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(
            updates[1],
            Update::Turtle(TurtleUpdate::Pen {
                color: "white".to_string(),
                is_pen_down: false
            })
        );
    }
}
