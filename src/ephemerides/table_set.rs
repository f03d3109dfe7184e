//! Table sets, their JSON description and the registry
//!
//! A table set description names, for every body, its mean motions, radices
//! and the ids of its tables:
//!
//! ```json
//! {
//!   "fixed_stars": {
//!     "mean_motion": ["0;0,0,4,20,41,17,12", "1,59;12,34"],
//!     "access_recess_mean_motion": ["0;0,0,30,24,49", "5,59;12,34"],
//!     "access_recess_equation": {"id": 238, "symmetry": [{"kind": "mirror"}]}
//!   },
//!   "sun": {"mean_motion": ["0;59,8,19,37", "4,38;21,0,30,28"],
//!           "apogee_radix": "1,11;25,23",
//!           "equation": {"id": 19, "append_symmetry": [{"kind": "anti_mirror"}]}},
//!   "moon": {"...": "..."},
//!   "oblique_ascension": {"tables": {"41;30": 174, "48": 175}},
//!   "right_ascension": {"table": 172}
//! }
//! ```
//!
//! Descriptions live in `<data dir>/table_sets/`, the tables they reference
//! in `<data dir>/tables/`.

use super::ascendant;
use super::bodies::{
    CelestialModel, FixedStars, InferiorPlanet, MeanMotion, MoonModel, PlanetTables,
    SunModel, SuperiorPlanet, TruePositionDetails,
};
use super::houses::{self, HouseMethod};
use super::{Body, ConfigurationError};
use crate::sexagesimal::{Angle, Sexagesimal};
use crate::tables::source::{get_data_dir, DirectoryTableSource, TableId, TableSource};
use crate::tables::{ObliqueAscension, RightAscension, SymmetricTable, Symmetry};
use crate::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// Fractional places kept when converting a float day count
pub const DEFAULT_DAY_PLACES: usize = 2;

/// A table reference: a bare id, or an id with symmetry overrides
///
/// `symmetry` replaces the symmetries stored with the table,
/// `append_symmetry` adds to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableInput {
    Id(TableId),
    Detailed {
        id: TableId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        symmetry: Option<Vec<Symmetry>>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        append_symmetry: Vec<Symmetry>,
    },
}

impl TableInput {
    pub fn id(&self) -> TableId {
        match self {
            TableInput::Id(id) | TableInput::Detailed { id, .. } => *id,
        }
    }

    /// Load the table and apply the symmetry overrides
    pub fn resolve(
        &self,
        source: &dyn TableSource,
    ) -> std::result::Result<SymmetricTable, ConfigurationError> {
        let mut raw = source.load(self.id())?;
        if let TableInput::Detailed {
            symmetry,
            append_symmetry,
            ..
        } = self
        {
            if let Some(symmetry) = symmetry {
                raw.symmetry = symmetry.clone();
            }
            raw.symmetry.extend(append_symmetry.iter().cloned());
        }
        raw.into_table().map_err(|e| ConfigurationError::BadTable {
            id: self.id(),
            role: "lookup",
            reason: e.to_string(),
        })
    }
}

impl From<TableId> for TableInput {
    fn from(id: TableId) -> Self {
        TableInput::Id(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedStarsDescription {
    pub mean_motion: MeanMotion,
    pub access_recess_mean_motion: MeanMotion,
    pub access_recess_equation: TableInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunDescription {
    pub mean_motion: MeanMotion,
    pub apogee_radix: Sexagesimal,
    pub equation: TableInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonDescription {
    pub mean_motion: MeanMotion,
    pub mean_argument: MeanMotion,
    pub equation_center: TableInput,
    pub equation_argument: TableInput,
    pub proportional_minutes: TableInput,
    pub diameter_diversion: TableInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetTablesDescription {
    pub center_equation: TableInput,
    pub argument_equation: TableInput,
    pub proportional_minutes: TableInput,
    pub long_longior: TableInput,
    pub long_propior: TableInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperiorDescription {
    pub mean_motion: MeanMotion,
    pub apogee_radix: Sexagesimal,
    #[serde(flatten)]
    pub tables: PlanetTablesDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferiorDescription {
    pub mean_argument: MeanMotion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_motion: Option<MeanMotion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apogee_radix: Option<Sexagesimal>,
    #[serde(flatten)]
    pub tables: PlanetTablesDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObliqueAscensionDescription {
    /// Latitude literal to table
    pub tables: BTreeMap<String, TableInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RightAscensionDescription {
    pub table: TableInput,
}

/// Everything needed to build a [`TableSet`] from a table source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSetDescription {
    pub fixed_stars: FixedStarsDescription,
    pub sun: SunDescription,
    pub moon: MoonDescription,
    pub mercury: InferiorDescription,
    pub venus: InferiorDescription,
    pub mars: SuperiorDescription,
    pub jupiter: SuperiorDescription,
    pub saturn: SuperiorDescription,
    pub oblique_ascension: ObliqueAscensionDescription,
    pub right_ascension: RightAscensionDescription,
}

impl TableSetDescription {
    /// Read a description from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ConfigurationError::InvalidDescription {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let description = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ConfigurationError::InvalidDescription {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        Ok(description)
    }
}

/// How a registry builds its table sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitMode {
    /// Build every known set when the registry is created
    Eager,
    /// Build each set the first time it is requested
    #[default]
    Lazy,
}

/// Settings shared by every table set of a registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EphemerisConfig {
    /// Fractional places kept when converting a float day count
    pub day_places: usize,
    pub init_mode: InitMode,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            day_places: DEFAULT_DAY_PLACES,
            init_mode: InitMode::default(),
        }
    }
}

impl EphemerisConfig {
    /// Read settings from a JSON file, missing keys taking their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Known table sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableSetName {
    ParisianAlphonsine,
}

impl TableSetName {
    pub const ALL: [TableSetName; 1] = [TableSetName::ParisianAlphonsine];

    pub fn name(&self) -> &'static str {
        match self {
            TableSetName::ParisianAlphonsine => "parisian_alphonsine_tables",
        }
    }

    /// Description file name inside `<data dir>/table_sets/`
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for TableSetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableSetName {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        TableSetName::ALL
            .iter()
            .copied()
            .find(|n| n.name() == key || n.name().trim_end_matches("_tables") == key)
            .ok_or_else(|| ConfigurationError::UnknownTableSet(s.to_string()))
    }
}

/// One tradition's parameters, frozen after construction
#[derive(Debug, Clone)]
pub struct TableSet {
    name: String,
    day_places: usize,
    sun: Arc<SunModel>,
    models: HashMap<Body, CelestialModel>,
    oblique_ascension: ObliqueAscension,
    right_ascension: RightAscension,
}

fn planet_tables(
    description: &PlanetTablesDescription,
    source: &dyn TableSource,
) -> std::result::Result<PlanetTables, ConfigurationError> {
    Ok(PlanetTables {
        center_equation: description.center_equation.resolve(source)?,
        argument_equation: description.argument_equation.resolve(source)?,
        proportional_minutes: description.proportional_minutes.resolve(source)?,
        long_longior: description.long_longior.resolve(source)?,
        long_propior: description.long_propior.resolve(source)?,
    })
}

impl TableSet {
    /// Build a table set, loading every referenced table from `source`
    pub fn build(
        name: &str,
        description: &TableSetDescription,
        source: &dyn TableSource,
        config: &EphemerisConfig,
    ) -> Result<Self> {
        let stars = &description.fixed_stars;
        let fixed_stars = Arc::new(FixedStars {
            mean_motion: stars.mean_motion.clone(),
            access_recess_mean_motion: stars.access_recess_mean_motion.clone(),
            access_recess_equation: stars.access_recess_equation.resolve(source)?,
        });

        let sun = Arc::new(SunModel {
            mean_motion: description.sun.mean_motion.clone(),
            apogee_radix: description.sun.apogee_radix.clone(),
            equation: description.sun.equation.resolve(source)?,
            fixed_stars,
        });

        let moon = &description.moon;
        let moon = MoonModel {
            mean_motion: moon.mean_motion.clone(),
            mean_argument: moon.mean_argument.clone(),
            equation_center: moon.equation_center.resolve(source)?,
            equation_argument: moon.equation_argument.resolve(source)?,
            proportional_minutes: moon.proportional_minutes.resolve(source)?,
            diameter_diversion: moon.diameter_diversion.resolve(source)?,
            sun: Arc::clone(&sun),
        };

        let mut models = HashMap::new();
        models.insert(Body::Sun, CelestialModel::Sun(Arc::clone(&sun)));
        models.insert(Body::Moon, CelestialModel::Moon(moon));

        for (body, planet) in [
            (Body::Mars, &description.mars),
            (Body::Jupiter, &description.jupiter),
            (Body::Saturn, &description.saturn),
        ] {
            let model = SuperiorPlanet {
                body,
                mean_motion: planet.mean_motion.clone(),
                apogee_radix: planet.apogee_radix.clone(),
                tables: planet_tables(&planet.tables, source)?,
                sun: Arc::clone(&sun),
            };
            models.insert(body, CelestialModel::Superior(model));
        }

        for (body, planet) in [
            (Body::Mercury, &description.mercury),
            (Body::Venus, &description.venus),
        ] {
            if planet.mean_motion.is_none() {
                info!("{}: {} uses the mean motion of the Sun", name, body);
            }
            let model = InferiorPlanet {
                body,
                mean_argument: planet.mean_argument.clone(),
                mean_motion: planet.mean_motion.clone(),
                apogee_radix: planet.apogee_radix.clone(),
                tables: planet_tables(&planet.tables, source)?,
                sun: Arc::clone(&sun),
            };
            models.insert(body, CelestialModel::Inferior(model));
        }

        let mut latitude_tables = Vec::new();
        for (latitude, input) in &description.oblique_ascension.tables {
            let latitude: Sexagesimal = latitude.parse()?;
            latitude_tables.push((latitude.to_f64(), input.resolve(source)?));
        }
        let oblique_ascension = ObliqueAscension::new(latitude_tables)?;

        let right_ascension = RightAscension::new(
            description.right_ascension.table.resolve(source)?,
        )?;

        info!(
            "Built table set {} ({} bodies, {} latitudes)",
            name,
            models.len(),
            oblique_ascension.latitudes().len()
        );

        Ok(Self {
            name: name.to_string(),
            day_places: config.day_places,
            sun,
            models,
            oblique_ascension,
            right_ascension,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sun(&self) -> &SunModel {
        &self.sun
    }

    pub fn oblique_ascension(&self) -> &ObliqueAscension {
        &self.oblique_ascension
    }

    pub fn right_ascension(&self) -> &RightAscension {
        &self.right_ascension
    }

    pub fn model(&self, body: Body) -> Result<&CelestialModel> {
        Ok(self
            .models
            .get(&body)
            .ok_or(ConfigurationError::MissingModel(body))?)
    }

    /// Convert a float day count to the sexagesimal used by the pipelines
    pub fn days(&self, days: f64) -> Result<Sexagesimal> {
        Ok(Sexagesimal::from_f64(days, self.day_places)?.into_value())
    }

    /// Every intermediate quantity of a true-position computation
    pub fn details(&self, body: Body, days: f64) -> Result<TruePositionDetails> {
        let days = self.days(days)?;
        Ok(self.model(body)?.details(&days)?)
    }

    /// True ecliptic longitude of a body, in `[0, 360)`
    pub fn true_position(&self, body: Body, days: f64) -> Result<Angle> {
        Ok(Angle::from_degrees(self.details(body, days)?.true_position))
    }

    /// Ecliptic longitude rising on the eastern horizon
    pub fn ascendant(&self, days: f64, latitude: f64) -> Result<Angle> {
        ascendant::ascendant(self, days, latitude)
    }

    /// The twelve house cusps, starting with the ascendant
    pub fn houses(&self, ascendant: &Angle, latitude: f64, method: HouseMethod) -> Result<[Angle; 12]> {
        houses::houses(self, ascendant.value(), latitude, method)
    }
}

/// Builds table sets from a data directory or an explicit source
pub struct TableSetLoader {
    data_dir: Option<PathBuf>,
    source: Option<Arc<dyn TableSource>>,
    config: EphemerisConfig,
}

impl TableSetLoader {
    /// Create a new loader with default data directory
    pub fn new() -> Self {
        Self {
            data_dir: None,
            source: None,
            config: EphemerisConfig::default(),
        }
    }

    /// Set a custom data directory
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Read tables from `source` instead of the data directory
    pub fn with_source(mut self, source: Arc<dyn TableSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_config(mut self, config: EphemerisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EphemerisConfig {
        &self.config
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(get_data_dir)
    }

    fn source(&self) -> Arc<dyn TableSource> {
        match &self.source {
            Some(source) => Arc::clone(source),
            None => Arc::new(DirectoryTableSource::new(self.data_dir())),
        }
    }

    /// Build a set from an in-memory description
    pub fn build(&self, name: &str, description: &TableSetDescription) -> Result<TableSet> {
        TableSet::build(name, description, self.source().as_ref(), &self.config)
    }

    /// Build a set from a description file
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<TableSet> {
        let path = path.as_ref();
        let description = TableSetDescription::from_file(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.build(&name, &description)
    }

    /// Build a known set from `<data dir>/table_sets/`
    pub fn load(&self, name: TableSetName) -> Result<TableSet> {
        let path = self.data_dir().join("table_sets").join(name.file_name());
        if !path.is_file() {
            warn!("No description for {} at {}", name, path.display());
        }
        self.load_file(path)
    }

    /// A registry over every known table set
    pub fn into_registry(self) -> Result<TableSetRegistry> {
        TableSetRegistry::new(self)
    }
}

impl Default for TableSetLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Named table sets, built eagerly or on first use
///
/// A set that fails to build stays failed; the error is reported on every
/// request.
pub struct TableSetRegistry {
    loader: TableSetLoader,
    sets: HashMap<TableSetName, OnceLock<std::result::Result<Arc<TableSet>, String>>>,
}

impl TableSetRegistry {
    pub fn new(loader: TableSetLoader) -> Result<Self> {
        let sets = TableSetName::ALL
            .iter()
            .map(|&name| (name, OnceLock::new()))
            .collect();
        let registry = Self { loader, sets };

        if registry.loader.config().init_mode == InitMode::Eager {
            for name in TableSetName::ALL {
                registry.get(name)?;
            }
        }
        Ok(registry)
    }

    pub fn init_mode(&self) -> InitMode {
        self.loader.config().init_mode
    }

    /// Whether a set has been built already
    pub fn is_loaded(&self, name: TableSetName) -> bool {
        self.sets
            .get(&name)
            .and_then(|cell| cell.get())
            .map_or(false, |built| built.is_ok())
    }

    pub fn get(&self, name: TableSetName) -> Result<Arc<TableSet>> {
        let cell = self
            .sets
            .get(&name)
            .ok_or_else(|| ConfigurationError::UnknownTableSet(name.to_string()))?;
        let built = cell.get_or_init(|| {
            info!("Loading table set {}", name);
            self.loader
                .load(name)
                .map(Arc::new)
                .map_err(|e| e.to_string())
        });
        match built {
            Ok(set) => Ok(Arc::clone(set)),
            Err(reason) => Err(ConfigurationError::Unavailable {
                name: name.to_string(),
                reason: reason.clone(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::source::{MemoryTableSource, RawTable};
    use std::fs;
    use tempfile::tempdir;

    fn sx(text: &str) -> Sexagesimal {
        text.parse().unwrap()
    }

    fn raw(samples: &[(&str, &str)]) -> RawTable {
        RawTable::new(
            samples.iter().map(|(a, v)| (sx(a), sx(v))).collect(),
            vec![],
        )
    }

    fn flat_source() -> MemoryTableSource {
        MemoryTableSource::new()
            .with_table(1, raw(&[("0", "0"), ("6,0", "0")]))
            .with_table(2, raw(&[("0", "0"), ("6,0", "6,0")]))
    }

    const DESCRIPTION: &str = r#"{
        "fixed_stars": {
            "mean_motion": ["0", "0"],
            "access_recess_mean_motion": ["0", "0"],
            "access_recess_equation": 1
        },
        "sun": {"mean_motion": ["1", "10"], "apogee_radix": "1,30", "equation": 1},
        "moon": {
            "mean_motion": ["13", "0"], "mean_argument": ["13", "0"],
            "equation_center": 1, "equation_argument": 1,
            "proportional_minutes": 1, "diameter_diversion": 1
        },
        "mercury": {"mean_argument": ["3", "0"], "center_equation": 1, "argument_equation": 1,
                    "proportional_minutes": 1, "long_longior": 1, "long_propior": 1},
        "venus": {"mean_argument": ["1;36", "0"], "apogee_radix": "1,11;25,23",
                  "center_equation": 1, "argument_equation": 1,
                  "proportional_minutes": 1, "long_longior": 1, "long_propior": 1},
        "mars": {"mean_motion": ["0;31", "0"], "apogee_radix": "1,55", "center_equation": 1,
                 "argument_equation": 1, "proportional_minutes": 1, "long_longior": 1, "long_propior": 1},
        "jupiter": {"mean_motion": ["0;5", "0"], "apogee_radix": "2,33", "center_equation": 1,
                    "argument_equation": 1, "proportional_minutes": 1, "long_longior": 1, "long_propior": 1},
        "saturn": {"mean_motion": ["0;2", "0"], "apogee_radix": "3,53", "center_equation": 1,
                   "argument_equation": 1, "proportional_minutes": 1, "long_longior": 1, "long_propior": 1},
        "oblique_ascension": {"tables": {"30": 2, "48;30": {"id": 2}}},
        "right_ascension": {"table": {"id": 2, "symmetry": []}}
    }"#;

    fn description() -> TableSetDescription {
        serde_json::from_str(DESCRIPTION).unwrap()
    }

    #[test]
    fn test_description_parses() {
        let description = description();
        assert_eq!(description.sun.equation, TableInput::Id(1));
        assert_eq!(description.venus.apogee_radix, Some(sx("1,11;25,23")));
        assert!(description.mercury.mean_motion.is_none());
        assert_eq!(description.oblique_ascension.tables.len(), 2);
    }

    #[test]
    fn test_table_input_symmetry_overrides() {
        let source = MemoryTableSource::new().with_table(
            5,
            RawTable::new(vec![(sx("0"), sx("0")), (sx("1,30"), sx("1"))], vec![Symmetry::mirror()]),
        );
        let replaced: TableInput =
            serde_json::from_str(r#"{"id": 5, "symmetry": [{"kind": "anti_mirror"}]}"#).unwrap();
        assert_eq!(replaced.resolve(&source).unwrap().symmetries(), &[Symmetry::anti_mirror()]);

        let appended: TableInput =
            serde_json::from_str(r#"{"id": 5, "append_symmetry": [{"kind": "periodic", "period": "6,0"}]}"#)
                .unwrap();
        assert_eq!(appended.resolve(&source).unwrap().symmetries().len(), 2);

        assert!(matches!(
            TableInput::Id(6).resolve(&source),
            Err(ConfigurationError::Source(_))
        ));
    }

    #[test]
    fn test_build_and_query() {
        let set = TableSetLoader::new()
            .with_source(Arc::new(flat_source()))
            .build("flat", &description())
            .unwrap();
        assert_eq!(set.name(), "flat");
        for body in Body::ALL {
            assert_eq!(set.model(body).unwrap().body(), body);
        }
        // Flat equations leave the Sun at its mean position
        assert_eq!(*set.true_position(Body::Sun, 20.0).unwrap().value(), sx("30"));
        assert_eq!(set.oblique_ascension().latitudes(), vec![30.0, 48.5]);
    }

    #[test]
    fn test_missing_table_is_configuration_error() {
        let source = MemoryTableSource::new().with_table(1, raw(&[("0", "0"), ("6,0", "0")]));
        let err = TableSetLoader::new()
            .with_source(Arc::new(source))
            .build("broken", &description())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::AlphonsineError::Configuration(ConfigurationError::Source(_))
        ));
    }

    #[test]
    fn test_day_conversion_precision() {
        let set = TableSetLoader::new()
            .with_source(Arc::new(flat_source()))
            .with_config(EphemerisConfig {
                day_places: 1,
                init_mode: InitMode::Lazy,
            })
            .build("flat", &description())
            .unwrap();
        assert_eq!(set.days(10.75).unwrap(), sx("10;45"));
        assert!(set.days(f64::NAN).is_err());
    }

    #[test]
    fn test_table_set_names() {
        assert_eq!(
            "parisian_alphonsine_tables".parse::<TableSetName>().unwrap(),
            TableSetName::ParisianAlphonsine
        );
        assert_eq!(
            "Parisian Alphonsine".parse::<TableSetName>().unwrap(),
            TableSetName::ParisianAlphonsine
        );
        assert!("toledan".parse::<TableSetName>().is_err());
        assert_eq!(
            TableSetName::ParisianAlphonsine.file_name(),
            "parisian_alphonsine_tables.json"
        );
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: EphemerisConfig = serde_json::from_str(r#"{"init_mode": "eager"}"#).unwrap();
        assert_eq!(config.day_places, DEFAULT_DAY_PLACES);
        assert_eq!(config.init_mode, InitMode::Eager);
    }

    fn write_data_dir(dir: &Path) {
        fs::create_dir_all(dir.join("tables")).unwrap();
        fs::create_dir_all(dir.join("table_sets")).unwrap();
        let source = flat_source();
        for id in [1, 2] {
            let json = serde_json::to_string(&source.load(id).unwrap()).unwrap();
            fs::write(dir.join("tables").join(format!("{}.json", id)), json).unwrap();
        }
        fs::write(
            dir.join("table_sets").join(TableSetName::ParisianAlphonsine.file_name()),
            DESCRIPTION,
        )
        .unwrap();
    }

    #[test]
    fn test_registry_lazy_and_eager() {
        let dir = tempdir().unwrap();
        write_data_dir(dir.path());

        let lazy = TableSetLoader::new()
            .with_data_dir(dir.path())
            .into_registry()
            .unwrap();
        assert_eq!(lazy.init_mode(), InitMode::Lazy);
        assert!(!lazy.is_loaded(TableSetName::ParisianAlphonsine));
        let first = lazy.get(TableSetName::ParisianAlphonsine).unwrap();
        let second = lazy.get(TableSetName::ParisianAlphonsine).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "parisian_alphonsine_tables");

        let eager = TableSetLoader::new()
            .with_data_dir(dir.path())
            .with_config(EphemerisConfig {
                init_mode: InitMode::Eager,
                ..EphemerisConfig::default()
            })
            .into_registry()
            .unwrap();
        assert!(eager.is_loaded(TableSetName::ParisianAlphonsine));
    }

    #[test]
    fn test_registry_reports_missing_data() {
        let dir = tempdir().unwrap();
        let lazy = TableSetLoader::new()
            .with_data_dir(dir.path())
            .into_registry()
            .unwrap();
        assert!(lazy.get(TableSetName::ParisianAlphonsine).is_err());

        let eager = TableSetLoader::new()
            .with_data_dir(dir.path())
            .with_config(EphemerisConfig {
                init_mode: InitMode::Eager,
                ..EphemerisConfig::default()
            })
            .into_registry();
        assert!(eager.is_err());
    }
}
