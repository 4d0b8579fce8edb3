//! Core library for the Courier framework.
//! Provides the foundational components for building actor-based applications:
//! the actor runtime with its mailbox dispatch loop, request/response
//! correlation, behavior stacks and message routers.

pub use actor::{
    Actor, ActorContext, ActorSystem, ActorSystemBuilder, AnyMessage,
    Behavior, Broadcast, DeadLetter, DeadLetterSink, Directive, Directory,
    Dispatcher, Error as ActorError, InMemoryDirectory, LogDeadLetterSink,
    LoggingSupervisor, Mailbox, Pid, Props, Receive, RootContext, RouteeSet,
    Routees, Router, RouterCommand, RouterPolicy, Started, Stopping,
    Supervisor, TokioDispatcher,
};
