use std::path::PathBuf;

use holdings::types::Date;

pub enum Action {
    Report {
        account: Option<String>,
        date: Date,
    },
    Show {
        account: Option<String>,
        date: Date,
    },
    MustHold {
        account: Option<String>,
        date: Date,
    },
    Sellable {
        account: Option<String>,
        date: Date,
    },

    ShellCompletion {
        path: PathBuf,
        data: Vec<u8>,
    },
}
