mod game_tests;
mod maze_tests;
mod property_game_tests;
