//! Validate static map files before handing them to the game server
//!
//! Checks that the size is positive, every obstacle is on the grid, and obstacles
//! are unique and sorted by x then y. With --fix, rewrites the file normalized.

use std::env;
use std::process;

use snake_agent::map_file::MapFile;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <map.json>... [--fix]", args[0]);
        eprintln!("Example: {} maps/arena.json --fix", args[0]);
        process::exit(1);
    }

    let fix = args.iter().any(|a| a == "--fix");
    let paths: Vec<&String> = args[1..].iter().filter(|a| *a != "--fix").collect();

    println!("Checking {} map file(s)...", paths.len());
    println!("========================================\n");

    let mut failures = 0;

    for path in paths {
        let mut map = match MapFile::from_file(path) {
            Ok(map) => map,
            Err(e) => {
                println!("UNREADABLE: {}: {}", path, e);
                failures += 1;
                continue;
            }
        };

        match map.validate() {
            Ok(()) => {
                println!(
                    "OK: {} ({}x{}, {} obstacles)",
                    path,
                    map.width,
                    map.height,
                    map.obstacles.len()
                );
            }
            Err(e) => {
                println!("INVALID: {}: {}", path, e);

                if !fix {
                    failures += 1;
                    continue;
                }

                map.normalize();
                if let Err(e) = map.validate() {
                    // Sorting cannot repair size or bounds problems
                    println!("  cannot fix: {}", e);
                    failures += 1;
                    continue;
                }

                match map.save(path) {
                    Ok(()) => println!("  rewrote {} with {} obstacles", path, map.obstacles.len()),
                    Err(e) => {
                        println!("  failed to rewrite: {}", e);
                        failures += 1;
                    }
                }
            }
        }
    }

    println!("\n========================================");
    if failures == 0 {
        println!("✅ All maps are valid!");
    } else {
        println!("❌ {} map(s) failed", failures);
        process::exit(1);
    }
}
