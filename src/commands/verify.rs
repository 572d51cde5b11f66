use std::fs;

use exn::ResultExt;
use takeout_listing::{EntryKind, Listing, Reconciliation, ServiceReport, reconcile};

use crate::cli::VerifyArgs;
use crate::commands::Status;
use crate::error::{ErrorKind, Result};

pub fn verify(args: &VerifyArgs) -> Result<Status> {
    let html = fs::read_to_string(&args.navigator).or_raise(|| ErrorKind::ReadNavigator(args.navigator.clone()))?;
    let listing = Listing::parse(&html).or_raise(|| ErrorKind::Listing)?;
    let reconciliation = reconcile(&listing, &args.root()).or_raise(|| ErrorKind::Listing)?;
    print_reconciliation(&reconciliation);
    Ok(if reconciliation.is_complete() { Status::Success } else { Status::Partial })
}

fn print_reconciliation(reconciliation: &Reconciliation) {
    for service in &reconciliation.services {
        println!("*** {} ***", service.name);
        if !service.present {
            println!("Not found!");
            continue;
        }
        for missing in &service.missing {
            match (missing.kind, missing.descendants) {
                (EntryKind::Folder, 0) => println!("Folder \"{}\" not found!", missing.path.display()),
                (EntryKind::Folder, n) => {
                    println!("Folder \"{}\" not found! ({n} entries inside)", missing.path.display());
                },
                (EntryKind::File, _) => println!("\"{}\" was not found!", missing.path.display()),
            }
        }
        println!("{} of {} entries present", service.expected.saturating_sub(missing_entries(service)), service.expected);
    }
}

fn missing_entries(service: &ServiceReport) -> usize {
    service.missing.iter().map(|m| 1 + m.descendants).sum()
}
