mod logout;
