use once_cell::sync::OnceCell;
use strongtype::property::{construct_static, Property, PropertyDispatch, PropertyTable, StaticInit};
use strongtype::value::ty::{Int, Text, UInt};
use strongtype::value::{slots, Boxed};
use strongtype::{Error, Kind, NamedType, Result, Value, Variable};

fn setup_tracing() {
	use tracing::level_filters::LevelFilter;

	let loglevel = std::env::var("STRONGTYPE_LOGGING");
	let filter = match loglevel.as_ref().map(|x| x.as_ref()) {
		Ok("T") | Ok("TRACE") => LevelFilter::TRACE,
		Ok("D") | Ok("DEBUG") => LevelFilter::DEBUG,
		Ok("I") | Ok("INFO") => LevelFilter::INFO,
		Ok("W") | Ok("WARN") => LevelFilter::WARN,
		Ok("E") | Ok("ERROR") => LevelFilter::ERROR,
		Ok("O") | Ok("OFF") => LevelFilter::OFF,
		_ => return,
	};

	tracing_subscriber::fmt().with_max_level(filter).init();
}

#[derive(NamedType)]
struct Person {
	name: Boxed<Text>,
	age: Boxed<UInt>,
	nickname: Boxed<Text>,
}

impl StaticInit for Person {
	fn init_static() {
		tracing::info!(properties=?Person::properties().names().collect::<Vec<_>>(), "registering Person");
	}
}

impl Person {
	fn new(name: &str, age: u32) -> Result<Self> {
		construct_static::<Self>();

		let mut person = Self {
			name: Boxed::new(Value::Null)?,
			age: Boxed::new(age)?,
			nickname: Boxed::new_nullable(Value::Null)?,
		};

		person.set("name", name)?;
		Ok(person)
	}

	fn properties() -> &'static PropertyTable<Self> {
		static PROPERTIES: OnceCell<PropertyTable<Person>> = OnceCell::new();

		PROPERTIES.get_or_init(|| {
			PropertyTable::new([
				("name", Property::new(|person: &Self| Ok(person.name.to_value())).with_setter(Self::set_name)),
				("age", Property::new(|person: &Self| Ok(person.age.to_value()))),
				(
					"nickname",
					Property::new(|person: &Self| Ok(person.nickname.to_value()))
						.with_setter(|person, value| person.nickname.set("value", value))
						.with_deleter(|person| person.nickname.delete("value")),
				),
				("email", Property::deferred()),
			])
		})
	}

	fn set_name(&mut self, name: Value) -> Result<()> {
		match name {
			Value::Text(text) if !text.is_empty() => self.name.assign(text),
			Value::Text(_) => Err(Error::invalid_value("Person::$name", "string", "must not be empty")),
			other => Err(Error::invalid_value("Person::$name", other.typename(), "must be a string")),
		}
	}
}

impl PropertyDispatch for Person {
	fn property(name: &str) -> Option<Property<Self>> {
		Self::properties().get(name)
	}
}

fn report(action: &str, result: Result<impl std::fmt::Display>) {
	match result {
		Ok(value) => println!("{action}: {value}"),
		Err(err) => println!("{action}: error: {err}"),
	}
}

fn person_walkthrough() -> Result<()> {
	let mut person = Person::new("Pierre", 42)?;

	report("name", person.get("name"));
	report("age", person.get("age"));
	report("set age", person.set("age", 6).map(|()| "ok"));
	report("set name to 12", person.set("name", 12).map(|()| "ok"));
	report("set name to \"\"", person.set("name", "").map(|()| "ok"));
	report("misc", person.get("misc"));
	report("has misc", person.has("misc"));
	report("has email", person.has("email"));

	person.set("nickname", "Pierrot")?;
	report("nickname", person.get("nickname"));
	person.delete("nickname")?;
	report("nickname after delete", person.get("nickname").map(|value| format!("{value:?}")));

	Ok(())
}

fn rescue_walkthrough() -> Result<()> {
	let var = Variable::default();
	Int::create(&var, 6, false)?;
	println!("created {var:?} in slot {:?}", var.slot());

	report("create again", Int::create(&var, 7, false).map(|()| "ok"));

	var.assign(7.5);
	println!("after assigning a float: {var:?} in slot {:?}", var.slot());

	var.assign("machin");
	println!("after assigning a string: {var:?} (live slots: {})", slots::live_count());

	let six = Boxed::<Int>::new(6)?;
	report("6 & 3", six.bit_and(3));
	report("!6", Ok(six.bit_not()));
	report("6 << -1", six.shift_left(-1));

	Ok(())
}

fn main() {
	setup_tracing();

	if let Err(err) = person_walkthrough().and_then(|()| rescue_walkthrough()) {
		eprintln!("{err:#}");
		std::process::exit(1);
	}
}
