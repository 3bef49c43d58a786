/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 *
 */

extern crate fontfinder;

use std::env;

use tracing_subscriber::EnvFilter;

fn main() -> fontfinder::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let records = fontfinder::get_all_local_fonts();
    if env::args().any(|arg| arg == "--json") {
        println!("{}", fontfinder::to_json(&records)?);
        return Ok(());
    }

    for family in fontfinder::group_by_family(records) {
        println!("{}", family.name);
        for face in family.faces {
            println!("  {:17} weight: {}, italic: {}, bold: {}, monospaced: {}",
                face.style, face.weight, face.italic, face.bold, face.monospace);
            println!("  {:17} {}", "", face.src);
        }
        println!();
    }
    Ok(())
}
