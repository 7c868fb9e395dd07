use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");

pub const BLOOD_MOON: &str = "BLOOD_MOON";
pub const GREAT_PLATEAU: &str = "GREAT_PLATEAU";

/// A named checkpoint of the run.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Waypoint {
    pub id: u32,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

impl Waypoint {
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    pub fn is_blood_moon(&self) -> bool {
        self.in_category(BLOOD_MOON)
    }
}

#[derive(Deserialize)]
struct WaypointFile {
    waypoints: Vec<Waypoint>,
}

/// Read-only lookup over the embedded waypoint table.
#[derive(Debug)]
pub struct Registry {
    waypoints: Vec<Waypoint>,
    by_id: HashMap<u32, usize>,
}

impl Registry {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: WaypointFile = from_str(json)?;
        let by_id = file
            .waypoints
            .iter()
            .enumerate()
            .map(|(idx, w)| (w.id, idx))
            .collect();

        Ok(Self {
            waypoints: file.waypoints,
            by_id,
        })
    }

    pub fn by_id(&self, id: u32) -> Option<&Waypoint> {
        self.by_id.get(&id).map(|&idx| &self.waypoints[idx])
    }

    /// Waypoints tagged with `category`, in table order.
    pub fn by_category(&self, category: &str) -> Vec<&Waypoint> {
        self.waypoints
            .iter()
            .filter(|w| w.in_category(category))
            .collect()
    }

    pub fn all(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Id of the first Blood Moon waypoint; the table always carries one.
    pub fn blood_moon_id(&self) -> Option<u32> {
        self.by_category(BLOOD_MOON).first().map(|w| w.id)
    }

    pub fn is_blood_moon(&self, id: u32) -> bool {
        self.by_id(id).is_some_and(Waypoint::is_blood_moon)
    }

    /// Everything the randomizer may shuffle, in table order.
    pub fn shuffle_pool(&self) -> Vec<u32> {
        self.waypoints
            .iter()
            .filter(|w| !w.is_blood_moon())
            .map(|w| w.id)
            .collect()
    }
}

/// The process-wide registry, parsed from the embedded data on first use.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let file = DATA_DIR
            .get_file("waypoints.json")
            .expect("Waypoint table not found");

        let file_as_str = file
            .contents_utf8()
            .expect("Unable to interpret waypoint table as a string");

        Registry::from_json(file_as_str).expect("Unable to deserialize waypoint json")
    })
}

pub fn by_id(id: u32) -> Option<&'static Waypoint> {
    registry().by_id(id)
}

pub fn by_category(category: &str) -> Vec<&'static Waypoint> {
    registry().by_category(category)
}

pub fn blood_moon_id() -> u32 {
    registry()
        .blood_moon_id()
        .expect("Waypoint table has no Blood Moon entry")
}
