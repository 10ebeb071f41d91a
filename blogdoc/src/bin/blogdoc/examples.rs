use crate::commands::{admin, feed, notifications, post, store, user};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "feed",
            groups: feed::EXAMPLES,
        },
        CommandExample {
            name: "post",
            groups: post::EXAMPLES,
        },
        CommandExample {
            name: "user",
            groups: user::EXAMPLES,
        },
        CommandExample {
            name: "notifications",
            groups: notifications::EXAMPLES,
        },
        CommandExample {
            name: "store",
            groups: store::EXAMPLES,
        },
        CommandExample {
            name: "admin",
            groups: admin::EXAMPLES,
        },
    ]
}
